//! docbrand CLI - brand audit and template conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docbrand::render::{self, JsonFormat};
use docbrand::{template_is_available, Docbrand, StyleSheet};

/// Template location used when neither `--template` nor `DOCBRAND_TEMPLATE`
/// is given.
const DEFAULT_TEMPLATE: &str = "template_assets/template.docx";

#[derive(Parser)]
#[command(name = "docbrand")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Audit Word documents against the brand rules and convert them into the branded template", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Highlight paragraphs that break the brand rules
    Audit {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Highlighted output .docx file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Write a JSON report of the findings
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Write the JSON report without indentation
        #[arg(long)]
        compact: bool,

        /// JSON style sheet overriding the template contract
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,
    },

    /// Re-render a document inside the branded template
    Convert {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Branded output .docx file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Branded template
        #[arg(long, env = "DOCBRAND_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// Title for the cover page
        #[arg(long)]
        title: Option<String>,

        /// JSON style sheet overriding the template contract
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,
    },

    /// Show the content blocks extracted from a document
    Parse {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Keep bullet descriptions as separate blocks
        #[arg(long)]
        flat: bool,

        /// JSON style sheet overriding the template contract
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,
    },

    /// Check that the template is present and defines the expected styles
    Template {
        /// Branded template
        #[arg(long, env = "DOCBRAND_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
        template: PathBuf,

        /// JSON style sheet overriding the template contract
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented plain text outline
    Text,
    /// Pretty-printed JSON
    Json,
    /// Compact JSON
    Compact,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Audit {
            input,
            output,
            report,
            compact,
            styles,
        }) => cmd_audit(&input, &output, report.as_deref(), compact, styles.as_deref()),
        Some(Commands::Convert {
            input,
            output,
            template,
            title,
            styles,
        }) => cmd_convert(&input, &output, &template, title.as_deref(), styles.as_deref()),
        Some(Commands::Parse {
            input,
            output,
            format,
            flat,
            styles,
        }) => cmd_parse(&input, output.as_deref(), format, flat, styles.as_deref()),
        Some(Commands::Template {
            template,
            styles,
            json,
        }) => cmd_template(&template, styles.as_deref(), json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: docbrand <audit|convert|parse|template> ...".yellow());
            println!("       docbrand --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn builder(styles: Option<&Path>) -> Result<Docbrand, Box<dyn std::error::Error>> {
    let docbrand = Docbrand::new();
    match styles {
        Some(path) => {
            log::debug!("Loading style sheet from {}", path.display());
            Ok(docbrand.with_styles(StyleSheet::from_json_file(path)?))
        }
        None => Ok(docbrand),
    }
}

fn require_input(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_file() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    Ok(())
}

fn cmd_audit(
    input: &Path,
    output: &Path,
    report: Option<&Path>,
    compact: bool,
    styles: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    require_input(input)?;
    let docbrand = builder(styles)?;

    println!("{} {}", "Auditing".cyan(), input.display());
    let result = docbrand.audit(input, output)?;

    let summary = render::audit_to_text(&result)?;
    if result.is_clean() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }

    if let Some(path) = report {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        fs::write(path, render::audit_to_json(&result, format)?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    println!("{} {}", "Audited document saved to".green(), output.display());
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    template: &Path,
    title: Option<&str>,
    styles: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    require_input(input)?;
    if !template_is_available(template) {
        return Err(format!("Template not found at {}", template.display()).into());
    }

    let mut docbrand = builder(styles)?.with_template(template);
    if let Some(title) = title {
        docbrand = docbrand.with_title(title);
    }

    println!("{} {}", "Converting".cyan(), input.display());
    docbrand.convert(input, output)?;
    println!("{} {}", "Converted document saved to".green(), output.display());
    Ok(())
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    flat: bool,
    styles: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut docbrand = builder(styles)?;
    if flat {
        docbrand = docbrand.flat();
    }
    let doc = docbrand.parse(input)?;

    let content = match format {
        OutputFormat::Text => render::to_text(&doc)?,
        OutputFormat::Json => render::to_json(&doc, JsonFormat::Pretty)?,
        OutputFormat::Compact => render::to_json(&doc, JsonFormat::Compact)?,
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_template(
    template: &Path,
    styles: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !template_is_available(template) {
        return Err(format!("Template not found at {}", template.display()).into());
    }

    let report = builder(styles)?.with_template(template).inspect_template()?;

    if json {
        println!("{}", render::serialize(&report, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), template.display());
    println!("{}: {}", "Paragraphs".bold(), report.paragraph_count);
    println!(
        "{}: {}",
        "Sections".bold(),
        if report.section_markers {
            "section breaks"
        } else {
            "fallback layout"
        }
    );

    if report.is_complete() {
        println!("{}", "All styles and numbering definitions present".green());
    } else {
        for id in &report.missing_styles {
            println!("{} style {}", "Missing".yellow(), id);
        }
        for id in &report.missing_num_ids {
            println!("{} numbering id {}", "Missing".yellow(), id);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docbrand".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Brand audit and template conversion tool");
    println!();
    println!("License: MIT");
}
