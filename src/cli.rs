//! Command line interface: lint SDL files matching one or more patterns.
use clap::{Parser, ValueEnum};
use graphql_schema_lint::lint::{report, LintConfig, Linter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Exit status when no findings were reported.
const EXIT_CLEAN: u8 = 0;
/// Exit status when at least one finding was reported.
const EXIT_FINDINGS: u8 = 1;
/// Exit status when a file or the configuration couldn't be loaded.
const EXIT_FAILURE: u8 = 2;

/// lint GraphQL SDL documents for structural problems
#[derive(Parser, Debug)]
#[command(name = "graphql-schema-lint", version)]
pub struct CommandLineInterface {
    /// JSON configuration file, e.g. `{ "rules": ["defined-types-are-used"] }`
    #[arg(long)]
    config: Option<PathBuf>,

    /// comma separated names of the rules to run, overrides the configuration
    #[arg(long, value_delimiter = ',')]
    rules: Vec<String>,

    /// how findings are printed
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// print the rules that would run and exit
    #[arg(long, default_value_t = false)]
    list_rules: bool,

    /// schema files; may be literal paths or quoted glob patterns
    #[arg(required_unless_present = "list_rules")]
    patterns: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> ExitCode {
        let mut config = match self.config.as_ref() {
            Some(path) => match load_config(path) {
                Ok(config) => config,
                Err(error) => {
                    eprintln!("Failed to load configuration ({}): {}", path.display(), error);
                    return ExitCode::from(EXIT_FAILURE);
                }
            },
            None => LintConfig::default(),
        };
        if !self.rules.is_empty() {
            config.rules = self.rules.clone();
        }

        let linter = Linter::from_config(&config);

        if self.list_rules {
            for rule in linter.rules() {
                println!("{}\t{}", rule.name(), rule.description());
            }
            return ExitCode::from(EXIT_CLEAN);
        }

        let paths = match resolve_file_path_patterns(&self.patterns) {
            Ok(paths) => paths,
            Err(error) => {
                eprintln!("Failed to resolve input file paths: {}", error);
                return ExitCode::from(EXIT_FAILURE);
            }
        };

        let mut failed = false;
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path.to_string_lossy().to_string();
            match std::fs::read_to_string(&path) {
                Ok(source) => sources.push((name, source)),
                Err(error) => {
                    eprintln!("Failed to read source file ({}): {}", name, error);
                    failed = true;
                }
            }
        }

        let mut findings = Vec::new();
        for ((name, _), result) in sources.iter().zip(linter.lint_sources(&sources)) {
            match result {
                Ok(file_findings) => findings.extend(file_findings),
                Err(error) => {
                    eprintln!("Failed to load schema ({}):\n{}", name, error);
                    failed = true;
                }
            }
        }
        info!(
            files = sources.len(),
            findings = findings.len(),
            "lint finished"
        );

        match self.format {
            Format::Text => print!("{}", report::render_text(&findings)),
            Format::Json => match report::render_json(&findings) {
                Ok(rendered) => println!("{}", rendered),
                Err(error) => {
                    eprintln!("Failed to render findings: {}", error);
                    return ExitCode::from(EXIT_FAILURE);
                }
            },
        }

        if failed {
            ExitCode::from(EXIT_FAILURE)
        } else if !findings.is_empty() {
            ExitCode::from(EXIT_FINDINGS)
        } else {
            ExitCode::from(EXIT_CLEAN)
        }
    }
}

fn load_config(path: &Path) -> Result<LintConfig, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    Ok(LintConfig::from_json(&source)?)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {}", pattern).into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
