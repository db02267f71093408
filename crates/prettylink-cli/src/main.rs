//! PrettyLink CLI - turn a URL into a pretty formatted link

use clap::{Parser, ValueEnum};
use prettylink::{LinkGenerator, LinkTemplate};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Markdown template that appends the hostname, with a marker when the link
/// points below the site root
const MD_TITLE_TEMPLATE: &str =
    "[{{{text}}} — {{{uri.hostname}}}{{#uri.hasPath}}/…{{/uri.hasPath}}]({{{url}}})";

/// Output format for the generated link
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Just the rendered link
    #[default]
    Md,
    /// Link data and rendered link as JSON
    Json,
}

/// PrettyLink - turn web page URLs into pretty formatted links
#[derive(Parser, Debug)]
#[command(name = "prettylink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to generate a link for
    url: String,

    /// Template to render with (html, html-new-tab, markdown, md-title)
    #[arg(long, short, default_value = "md-title")]
    template: String,

    /// Output format
    #[arg(long, short, default_value = "md")]
    output: OutputFormat,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut builder = LinkGenerator::builder();
    if let Some(ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }
    let mut generator = builder.build();

    if let Err(e) = generator.register_template("md-title", LinkTemplate::new(MD_TITLE_TEMPLATE)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    match generator.generate(&cli.url, &cli.template).await {
        Ok(generated) => match cli.output {
            OutputFormat::Md => writeln_safe(&generated.rendered),
            OutputFormat::Json => match serde_json::to_string_pretty(&generated) {
                Ok(json) => writeln_safe(&json),
                Err(e) => {
                    eprintln!("Error serializing link: {}", e);
                    std::process::exit(1);
                }
            },
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Log to stderr, filtered by RUST_LOG, so the link stays alone on stdout
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prettylink::{render, template_fields};

    #[test]
    fn test_md_title_template_with_path() {
        let fields = template_fields("https://blog.example.com/a/b", "A Post", "A Post");
        assert_eq!(
            render(MD_TITLE_TEMPLATE, &fields),
            "[A Post — blog.example.com/…](https://blog.example.com/a/b)"
        );
    }

    #[test]
    fn test_md_title_template_without_path() {
        let fields = template_fields("https://example.com/", "Home", "Home");
        assert_eq!(
            render(MD_TITLE_TEMPLATE, &fields),
            "[Home — example.com](https://example.com/)"
        );
    }
}
