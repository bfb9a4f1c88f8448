//! italic-sheets - Italic calligraphy practice sheet generator
//!
//! Generates guide sheets as SVG drawings and gathers them into flat OpenDocument text
//! files ready for printing.

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use italic_sheets::layout::GridPosition;
use italic_sheets::{
    read_paper_table, write_grid_svg, write_svg, Batch, BatchConfig, Colour, Document,
    EmbeddedImage, GridSheet, Grouping, HandProportions, ImageSpec, Info, InvalidParameterError,
    LengthUnit, Mm, PageSpec, Resolution, Sheet, SheetError, SheetStyle, Template, NIB_WIDTH_KEY,
    PAPER_SIZE_KEY,
};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "italic-sheets",
    version,
    about = "Italic calligraphy practice sheets as SVG drawings and flat OpenDocument files",
    after_help = "EXAMPLES:\n  \
                  # Sheets for three nib widths on every paper size in papers.tsv\n  \
                  italic-sheets batch -p papers.tsv 2 3 3.8\n\n  \
                  # A single A4 sheet (200mm x 287mm drawing) for a 2mm nib\n  \
                  italic-sheets sheet 2 200 287 -o sheet.svg\n\n  \
                  # Slant lines at 85 degrees from the baseline every 10mm\n  \
                  italic-sheets slant 85 10 200 287 -o slant.svg\n\n  \
                  # 5mm squared grid\n  \
                  italic-sheets grid 5 200 287 -o grid.svg\n\n  \
                  # Combine existing drawings into one printable document\n  \
                  italic-sheets compose 210 297 5 a.svg b.svg -o sheets.fodt"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sheets for every combination of nib width and paper size, plus documents of them
    Batch(BatchCommand),

    /// A single practice sheet drawing
    Sheet(SheetCommand),

    /// A drawing of nothing but slant lines
    Slant(SlantCommand),

    /// A drawing of a square grid or ruled lines
    Grid(GridCommand),

    /// Combine existing SVG drawings into a flat OpenDocument text file
    Compose(ComposeCommand),
}

/// Proportions of the hand, in nib widths
#[derive(Args)]
struct HandArgs {
    /// x-height
    #[arg(short = 'x', long, default_value_t = 5.0)]
    x_height: f64,

    /// Ascender height above the waistline
    #[arg(short, long, default_value_t = 5.0)]
    ascender: f64,

    /// Descender depth below the baseline
    #[arg(short, long, default_value_t = 5.0)]
    descender: f64,

    /// Capital height above the baseline
    #[arg(short, long, default_value_t = 7.0)]
    cap_height: f64,

    /// Slant angle in degrees from the baseline (85 leans 5 degrees off vertical); 90 draws
    /// no slant lines
    #[arg(short, long, default_value_t = 90.0)]
    slant: f64,
}

impl HandArgs {
    fn proportions(&self) -> HandProportions {
        let mut proportions = HandProportions::default();
        proportions
            .x_height(self.x_height)
            .ascender(self.ascender)
            .descender(self.descender)
            .cap_height(self.cap_height)
            .slant_angle(self.slant);
        proportions
    }
}

/// How sheets are drawn
#[derive(Args)]
struct StyleArgs {
    /// Distance between slant lines, in nib widths
    #[arg(short = 'w', long, default_value_t = 3.0)]
    box_width: f64,

    /// Draw a pen ladder beside every line of writing
    #[arg(short = 'l', long)]
    pen_ladder: bool,

    /// Baseline thickness in mm
    #[arg(long, default_value_t = 0.25)]
    baseline: f64,

    /// Waistline thickness in mm
    #[arg(long, default_value_t = 0.1)]
    waistline: f64,

    /// Cap line thickness in mm
    #[arg(long, default_value_t = 0.25)]
    capline: f64,

    /// Ascender and descender line thickness in mm
    #[arg(long, default_value_t = 0.1)]
    ascender_line: f64,

    /// Slant line thickness in mm
    #[arg(long, default_value_t = 0.1)]
    slant_line: f64,

    /// Stroke colour: #rgb, #rrggbb, black, grey, red or blue
    #[arg(long, default_value = "black")]
    colour: String,
}

impl StyleArgs {
    fn style(&self) -> Result<SheetStyle, SheetError> {
        let mut style = SheetStyle {
            baseline_thickness: Mm(self.baseline),
            waistline_thickness: Mm(self.waistline),
            cap_line_thickness: Mm(self.capline),
            ascender_descender_thickness: Mm(self.ascender_line),
            slant_line_thickness: Mm(self.slant_line),
            ..Default::default()
        };
        style
            .box_width(self.box_width)
            .pen_ladder(self.pen_ladder)
            .colour(self.colour.parse()?);
        Ok(style)
    }
}

#[derive(Args)]
struct BatchCommand {
    /// Nib widths in mm
    #[arg(required = true, num_args = 1..)]
    nib_widths: Vec<f64>,

    /// Tab-separated paper table (width, height, margin in mm, then a name); read from
    /// stdin when omitted
    #[arg(short, long)]
    papers: Option<PathBuf>,

    #[command(flatten)]
    hand: HandArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Drawing resolution in pixels per mm
    #[arg(short = 'R', long, default_value_t = 30.0)]
    resolution: f64,

    /// Unit for lengths in the documents: mm, cm, in, pt or pc
    #[arg(long, default_value = "mm")]
    units: String,

    /// Drawing file names; {nibwidth} and {papersize} are substituted
    #[arg(long, default_value = italic_sheets::DEFAULT_SVG_FILENAME)]
    svg_name: String,

    /// Document file names; {papersize} is substituted
    #[arg(long, default_value = italic_sheets::DEFAULT_DOCUMENT_FILENAME)]
    document_name: String,

    /// Document titles; {papersize} is substituted
    #[arg(short, long, default_value = italic_sheets::DEFAULT_TITLE)]
    title: String,

    /// Document descriptions; {papersize} is substituted
    #[arg(long, default_value = "")]
    description: String,

    /// Dedicate the output to the public domain on behalf of this author
    #[arg(long)]
    dedicate: Option<String>,

    /// Put every sheet into one document instead of one per paper size
    #[arg(long)]
    single_document: bool,

    /// Generate sheets one at a time
    #[arg(long)]
    sequential: bool,

    /// Directory to write into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

impl BatchCommand {
    fn execute(self) -> Result<()> {
        let pages = match &self.papers {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                read_paper_table(file)
            }
            None => {
                let mut table = Vec::new();
                io::stdin()
                    .read_to_end(&mut table)
                    .context("failed to read the paper table from stdin")?;
                read_paper_table(table.as_slice())
            }
        }
        .context("invalid paper table")?;
        info!(papers = pages.len(), "read paper table");

        let document_keys = [PAPER_SIZE_KEY];
        let config = BatchConfig {
            proportions: self.hand.proportions(),
            style: self.style.style()?,
            resolution: Resolution::new(self.resolution)?,
            unit: self.units.parse()?,
            svg_filename: Template::new(&self.svg_name, &[NIB_WIDTH_KEY, PAPER_SIZE_KEY])?,
            document_filename: Template::new(&self.document_name, &document_keys)?,
            title: Template::new(&self.title, &document_keys)?,
            description: Template::new(&self.description, &document_keys)?,
            dedication_author: self.dedicate,
            grouping: if self.single_document {
                Grouping::Single
            } else {
                Grouping::PerPageSpec
            },
            parallel: !self.sequential,
        };
        let nib_widths = self.nib_widths.into_iter().map(Mm).collect();

        let output = Batch::new(config, nib_widths, pages)?
            .run()
            .context("failed to generate sheets")?;
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;
        let written = output
            .write_to_dir(&self.output_dir)
            .context("failed to write output")?;
        info!(files = written.len(), "done");
        Ok(())
    }
}

#[derive(Args)]
struct SheetCommand {
    /// Nib width in mm
    nib_width: f64,

    /// Drawing width in mm
    width: f64,

    /// Drawing height in mm
    height: f64,

    #[command(flatten)]
    hand: HandArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Drawing resolution in pixels per mm
    #[arg(short = 'R', long, default_value_t = 30.0)]
    resolution: f64,

    /// Dedicate the drawing to the public domain on behalf of this author
    #[arg(long)]
    dedicate: Option<String>,

    /// File to write; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SheetCommand {
    fn execute(self) -> Result<()> {
        let hand = self.hand.proportions().with_nib_width(Mm(self.nib_width))?;
        let image = ImageSpec::new(
            Mm(self.width),
            Mm(self.height),
            Resolution::new(self.resolution)?,
        )?;
        let sheet = Sheet::new(hand, image, self.style.style()?)?;

        let mut info = Info::new();
        if let Some(author) = &self.dedicate {
            info.dedicate(author);
        }
        emit(&sheet, &info, self.output)
    }
}

#[derive(Args)]
struct SlantCommand {
    /// Slant angle in degrees from the baseline; 90 is upright
    angle: f64,

    /// Horizontal distance between slant lines in mm
    spacing: f64,

    /// Drawing width in mm
    width: f64,

    /// Drawing height in mm
    height: f64,

    /// Slant line thickness in mm
    #[arg(long, default_value_t = 0.1)]
    slant_line: f64,

    /// Drawing resolution in pixels per mm
    #[arg(short = 'R', long, default_value_t = 30.0)]
    resolution: f64,

    /// Dedicate the drawing to the public domain on behalf of this author
    #[arg(long)]
    dedicate: Option<String>,

    /// File to write; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SlantCommand {
    fn execute(self) -> Result<()> {
        let image = ImageSpec::new(
            Mm(self.width),
            Mm(self.height),
            Resolution::new(self.resolution)?,
        )?;
        let style = SheetStyle {
            slant_line_thickness: Mm(self.slant_line),
            ..Default::default()
        };
        let sheet = Sheet::slant_guides(self.angle, Mm(self.spacing), image, style)?;

        let mut info = Info::new();
        if let Some(author) = &self.dedicate {
            info.dedicate(author);
        }
        emit(&sheet, &info, self.output)
    }
}

#[derive(Args)]
struct GridCommand {
    /// Width and height of each grid square in mm
    square: f64,

    /// Drawing width in mm
    width: f64,

    /// Drawing height in mm
    height: f64,

    /// Leave out the vertical lines, for ruled paper
    #[arg(short, long)]
    no_vertical_lines: bool,

    /// Where the grid is aligned: c, ul, ur, bl or br
    #[arg(short = 'P', long, default_value = "c")]
    position: String,

    /// Line thickness in mm
    #[arg(short, long, default_value_t = 0.25)]
    thickness: f64,

    /// Stroke colour: #rgb, #rrggbb, black, grey, red or blue
    #[arg(long, default_value = "black")]
    colour: String,

    /// Drawing resolution in pixels per mm
    #[arg(short = 'R', long, default_value_t = 30.0)]
    resolution: f64,

    /// Dedicate the drawing to the public domain on behalf of this author
    #[arg(long)]
    dedicate: Option<String>,

    /// File to write; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GridCommand {
    fn execute(self) -> Result<()> {
        let image = ImageSpec::new(
            Mm(self.width),
            Mm(self.height),
            Resolution::new(self.resolution)?,
        )?;
        let position: GridPosition = self.position.parse()?;
        let colour: Colour = self.colour.parse()?;
        let grid = GridSheet::new(
            Mm(self.square),
            image,
            position,
            !self.no_vertical_lines,
            Mm(self.thickness),
            colour,
        )?;

        let mut info = Info::new();
        if let Some(author) = &self.dedicate {
            info.dedicate(author);
        }
        match self.output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                write_grid_svg(&grid, &info, BufWriter::new(file))?;
                info!(path = %path.display(), "wrote drawing");
            }
            None => write_grid_svg(&grid, &info, io::stdout().lock())?,
        }
        Ok(())
    }
}

#[derive(Args)]
struct ComposeCommand {
    /// Page width in mm
    width: f64,

    /// Page height in mm
    height: f64,

    /// Margin on every side in mm
    margin: f64,

    /// SVG drawings, one per page, in order
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Pixels per mm used to turn each drawing's declared size into a physical size
    #[arg(short = 'R', long, default_value_t = 30.0)]
    resolution: f64,

    /// Unit for lengths in the document: mm, cm, in, pt or pc
    #[arg(long, default_value = "mm")]
    units: String,

    /// Document title
    #[arg(short, long)]
    title: Option<String>,

    /// Document description
    #[arg(short, long)]
    description: Option<String>,

    /// Dedicate the document to the public domain on behalf of this author
    #[arg(long)]
    dedicate: Option<String>,

    /// File to write; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ComposeCommand {
    fn execute(self) -> Result<()> {
        let unit: LengthUnit = self.units.parse()?;
        let page = PageSpec::new(Mm(self.width), Mm(self.height), Mm(self.margin), "page")?
            .with_unit(unit);
        let resolution = Resolution::new(self.resolution)?;

        let mut info = Info::new();
        if let Some(title) = &self.title {
            info.title(title);
        }
        if let Some(description) = &self.description {
            info.description(description);
        }
        if let Some(author) = &self.dedicate {
            info.dedicate(author);
        }

        let mut document = Document::default();
        document.set_info(info);
        for path in self.files.iter() {
            let image = EmbeddedImage::new_svg_from_disk(path, resolution)
                .with_context(|| format!("failed to load {}", path.display()))?;
            document.add_image_page(page.clone(), image);
        }

        match self.output {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                document.write(BufWriter::new(file))?;
                info!(path = %path.display(), pages = document.pages.len(), "wrote document");
            }
            None => document.write(io::stdout().lock())?,
        }
        Ok(())
    }
}

fn emit(sheet: &Sheet, info: &Info, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_svg(sheet, info, BufWriter::new(file))?;
            info!(path = %path.display(), "wrote drawing");
        }
        None => write_svg(sheet, info, io::stdout().lock())?,
    }
    Ok(())
}

/// Bad input exits with 1, anything that goes wrong while generating exits with 2
fn exit_code(err: &anyhow::Error) -> u8 {
    let invalid_input = err.chain().any(|cause| {
        cause.is::<InvalidParameterError>()
            || matches!(
                cause.downcast_ref::<SheetError>(),
                Some(
                    SheetError::InvalidParameter(_)
                        | SheetError::PaperTable { .. }
                        | SheetError::Csv(_)
                        | SheetError::Template { .. }
                        | SheetError::UnknownUnit(_)
                        | SheetError::UnknownColour(_)
                        | SheetError::UnknownGridPosition(_)
                )
            )
    });
    if invalid_input {
        1
    } else {
        2
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Batch(cmd) => cmd.execute(),
        Commands::Sheet(cmd) => cmd.execute(),
        Commands::Slant(cmd) => cmd.execute(),
        Commands::Grid(cmd) => cmd.execute(),
        Commands::Compose(cmd) => cmd.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}
