//! Command-line front-end behind the `ffind` binary.
//!
//! [`run`] parses arguments, builds a [`Finder`] and prints one path per
//! match (or the number of matches) to the supplied output handle. Exit
//! codes: `0` on success, `1` for argument or query errors, `2` when the
//! filesystem walk or output fails.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::{Finder, FinderError};

/// Exit code for a successful search.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for rejected arguments or restrictions.
pub const EXIT_USAGE: u8 = 1;
/// Exit code for filesystem or output failures.
pub const EXIT_IO: u8 = 2;

/// Entry type selected by `--type`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TypeFilter {
    /// `f`: regular files.
    Files,
    /// `d`: directories.
    Directories,
}

/// Parsed command line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    /// Search roots.
    pub paths: Vec<PathBuf>,
    /// Name masks; empty means `*`.
    pub masks: Vec<String>,
    /// Restrict to one entry type.
    pub kind: Option<TypeFilter>,
    /// Masks pruned from the walk.
    pub excludes: Vec<String>,
    /// Size predicates, all of which must hold.
    pub sizes: Vec<String>,
    /// Date predicates, all of which must hold.
    pub dates: Vec<String>,
    /// Depth limit; `-1` is unlimited.
    pub max_depth: Option<i32>,
    /// List only the roots' immediate contents.
    pub no_recurse: bool,
    /// Yield directory contents before the directory.
    pub child_first: bool,
    /// Print the number of matches instead of the matches.
    pub count: bool,
    /// Number of `-v` flags.
    pub verbosity: u8,
}

impl Options {
    /// Builds the query described by these options.
    pub fn to_finder(&self) -> Result<Finder, FinderError> {
        let masks: Vec<&str> = if self.masks.is_empty() {
            vec!["*"]
        } else {
            self.masks.iter().map(String::as_str).collect()
        };

        let mut finder = match self.kind {
            Some(TypeFilter::Files) => Finder::find_files(&masks)?,
            Some(TypeFilter::Directories) => Finder::find_directories(&masks)?,
            None => Finder::find(&masks)?,
        };
        for size in &self.sizes {
            finder = finder.size(size)?;
        }
        for date in &self.dates {
            finder = finder.date(date)?;
        }

        let roots = self.paths.iter().cloned();
        finder = if self.no_recurse {
            finder.within(roots)?
        } else {
            finder.from(roots)?
        };

        finder = finder.exclude(&self.excludes)?;
        if let Some(depth) = self.max_depth {
            finder = finder.limit_depth(depth)?;
        }
        if self.child_first {
            finder = finder.child_first();
        }
        Ok(finder)
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("ffind")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search directory trees for files and directories matching glob masks.")
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .value_name("MASK")
                .help("Select entries whose path ends with MASK (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .short('t')
                .value_name("f|d")
                .help("Select only files (f) or directories (d).")
                .value_parser(["f", "d"])
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .short('x')
                .value_name("MASK")
                .help("Do not descend into directories matching MASK (repeatable).")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .short('s')
                .value_name("PRED")
                .help("Restrict size, e.g. '>=10K' or '<1.5M' (repeatable).")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .short('d')
                .value_name("PRED")
                .help("Restrict modification time, e.g. '>2024-01-01' (repeatable).")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .value_name("N")
                .help("Descend at most N levels below the roots' children.")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("no-recurse")
                .long("no-recurse")
                .help("List only the immediate contents of each PATH.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("child-first")
                .long("child-first")
                .help("Print directory contents before the directory itself.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .short('c')
                .help("Print the number of matches instead of the matches.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .help("Increase diagnostic output (repeatable).")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Parses command-line arguments into [`Options`].
///
/// The first argument is the program name.
pub fn parse_args<I, S>(arguments: I) -> Result<Options, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from("ffind"));
    }
    let matches = clap_command().try_get_matches_from(args)?;

    let kind = matches
        .get_one::<String>("type")
        .map(|kind| match kind.as_str() {
            "d" => TypeFilter::Directories,
            _ => TypeFilter::Files,
        });

    Ok(Options {
        paths: matches
            .get_many::<PathBuf>("paths")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        masks: strings(&matches, "name"),
        kind,
        excludes: strings(&matches, "exclude"),
        sizes: strings(&matches, "size"),
        dates: strings(&matches, "date"),
        max_depth: matches.get_one::<i32>("max-depth").copied(),
        no_recurse: matches.get_flag("no-recurse"),
        child_first: matches.get_flag("child-first"),
        count: matches.get_flag("count"),
        verbosity: matches.get_count("verbose"),
    })
}

/// Writes a parse failure and returns the exit code for it.
///
/// `--help` and `--version` arrive here as well and go to `stdout`.
pub fn report_parse_error<Out, Err>(error: &clap::Error, stdout: &mut Out, stderr: &mut Err) -> u8
where
    Out: Write,
    Err: Write,
{
    use clap::error::ErrorKind;

    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{}", error.render());
            EXIT_SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{}", error.render());
            EXIT_USAGE
        }
    }
}

/// Runs the search described by `options`.
pub fn execute<Out, Err>(options: &Options, stdout: &mut Out, stderr: &mut Err) -> u8
where
    Out: Write,
    Err: Write,
{
    let finder = match options.to_finder() {
        Ok(finder) => finder,
        Err(error) => {
            let _ = writeln!(stderr, "ffind: {error}");
            return EXIT_USAGE;
        }
    };
    let entries = match finder.iter() {
        Ok(entries) => entries,
        Err(error) => {
            let _ = writeln!(stderr, "ffind: {error}");
            return EXIT_USAGE;
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "finder::cli",
        roots = options.paths.len(),
        count_only = options.count,
        "starting search"
    );

    let mut status = EXIT_SUCCESS;
    let mut total = 0_usize;
    for entry in entries {
        match entry {
            Ok(entry) => {
                total += 1;
                if !options.count
                    && let Err(error) = writeln!(stdout, "{}", entry.full_path().display())
                {
                    return report_write_failure(&error, stderr);
                }
            }
            Err(error) => {
                let _ = writeln!(stderr, "ffind: {error}");
                status = EXIT_IO;
            }
        }
    }

    if options.count
        && let Err(error) = writeln!(stdout, "{total}")
    {
        return report_write_failure(&error, stderr);
    }
    status
}

fn report_write_failure<Err: Write>(error: &io::Error, stderr: &mut Err) -> u8 {
    let _ = writeln!(stderr, "ffind: failed to write output: {error}");
    EXIT_IO
}

/// Parses `arguments` and runs the search; returns the process exit code.
///
/// # Examples
///
/// ```
/// let mut stdout = Vec::new();
/// let mut stderr = Vec::new();
/// let code = finder::cli::run(["ffind", "--version"], &mut stdout, &mut stderr);
///
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(stdout).unwrap().starts_with("ffind"));
/// ```
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> u8
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(options) => execute(&options, stdout, stderr),
        Err(error) => report_parse_error(&error, stdout, stderr),
    }
}

/// Installs a `fmt` subscriber writing to standard error.
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` selects the level,
/// starting at `warn`. Does nothing when a global subscriber is already set.
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}
