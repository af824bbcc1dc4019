use clap::{Parser, Subcommand, ValueEnum};

/// Multi-source grammar and spelling checker
#[derive(Parser, Debug)]
#[command(
    name = "lingocheck",
    about = "Multi-source grammar and spelling checker",
    version,
    author,
    long_about = "lingocheck routes text to specialised grammar and spelling services for \
                  its language, merges their findings and removes duplicates. It runs as an \
                  HTTP service with a browser page, or checks a single text from the terminal."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Enable debug logging"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the HTTP server",
        long_about = "Serves the check page and the JSON API until interrupted.\n\n\
                      Examples:\n  \
                      lingocheck serve\n  \
                      lingocheck serve --bind 0.0.0.0:8080"
    )]
    Serve(ServeArgs),

    #[command(
        about = "Check a single text",
        long_about = "Runs one check against the live backends and prints the merged report.\n\n\
                      Examples:\n  \
                      lingocheck check \"She go to school\"\n  \
                      lingocheck check --language ko \"아버지가방에 들어가신다\"\n  \
                      cat essay.txt | lingocheck check - --format json"
    )]
    Check(CheckArgs),

    #[command(about = "List supported languages and their backends")]
    Languages(LanguagesArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(
        short = 'b',
        long,
        value_name = "ADDR",
        help = "Listen address (overrides LINGOCHECK_BIND)"
    )]
    pub bind: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "TEXT", help = "Text to check, or '-' to read stdin")]
    pub text: String,

    #[arg(
        short = 'l',
        long,
        value_name = "TAG",
        default_value = "auto",
        help = "Language tag, or 'auto' to detect"
    )]
    pub language: String,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct LanguagesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
