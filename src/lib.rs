mod batch;
pub use batch::*;

mod colour;
pub use colour::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod hand;
pub use hand::*;

mod image;
pub use self::image::*;

mod image_spec;
pub use image_spec::*;

mod info;
pub use info::*;

pub mod layout;

mod page;
pub use page::*;

pub mod pagesize;
pub use pagesize::PageSpec;

mod paper_table;
pub use paper_table::*;

mod rect;
pub use rect::*;

mod sheet;
pub use sheet::*;

mod style;
pub use style::*;

mod svg;
pub use svg::*;

mod template;
pub use template::*;

mod units;
pub use units::*;

pub mod validate;
