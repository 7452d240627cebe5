use carbon::{Carbon, Config, Error};
use clap::{Args, Parser, Subcommand, ValueEnum};

mod logging;

#[derive(thiserror::Error, Debug)]
pub enum CarbonCliError {
    #[error("{0}")]
    LibraryError(#[from] Error),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum UnitArg {
    Centuries,
    Decades,
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl UnitArg {
    fn add(self, c: &Carbon, count: i64, no_overflow: bool) -> Carbon {
        match (self, no_overflow) {
            (UnitArg::Centuries, false) => c.add_centuries(count),
            (UnitArg::Centuries, true) => c.add_centuries_no_overflow(count),
            (UnitArg::Decades, false) => c.add_decades(count),
            (UnitArg::Decades, true) => c.add_decades_no_overflow(count),
            (UnitArg::Years, false) => c.add_years(count),
            (UnitArg::Years, true) => c.add_years_no_overflow(count),
            (UnitArg::Quarters, false) => c.add_quarters(count),
            (UnitArg::Quarters, true) => c.add_quarters_no_overflow(count),
            (UnitArg::Months, false) => c.add_months(count),
            (UnitArg::Months, true) => c.add_months_no_overflow(count),
            // overflow only applies to month-based units
            (UnitArg::Weeks, _) => c.add_weeks(count),
            (UnitArg::Days, _) => c.add_days(count),
            (UnitArg::Hours, _) => c.add_hours(count),
            (UnitArg::Minutes, _) => c.add_minutes(count),
            (UnitArg::Seconds, _) => c.add_seconds(count),
            (UnitArg::Milliseconds, _) => c.add_milliseconds(count),
            (UnitArg::Microseconds, _) => c.add_microseconds(count),
            (UnitArg::Nanoseconds, _) => c.add_nanoseconds(count),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum DiffUnitArg {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DiffUnitArg {
    fn diff(self, from: &Carbon, to: Option<&Carbon>) -> i64 {
        match self {
            DiffUnitArg::Years => from.diff_in_years(to),
            DiffUnitArg::Months => from.diff_in_months(to),
            DiffUnitArg::Weeks => from.diff_in_weeks(to),
            DiffUnitArg::Days => from.diff_in_days(to),
            DiffUnitArg::Hours => from.diff_in_hours(to),
            DiffUnitArg::Minutes => from.diff_in_minutes(to),
            DiffUnitArg::Seconds => from.diff_in_seconds(to),
        }
    }
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
struct GlobalArgs {
    /// IANA zone to read and print values in, such as `Asia/Shanghai`. `Local` is the system zone.
    #[arg(short, long, global = true, default_value = "UTC")]
    timezone: String,

    /// Locale for month names, weekday names and human readable differences.
    #[arg(short, long, global = true, default_value = carbon::DEFAULT_LOCALE)]
    locale: String,

    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` overrides it.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl GlobalArgs {
    fn to_config(&self) -> Result<Config, CarbonCliError> {
        let config = Config::default()
            .with_timezone_name(&self.timezone)?
            .with_locale(&self.locale)?;
        Ok(config)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Commands {
    /// Parses a value and prints it.
    ///
    /// Without `--layout` or `--format`, common notations are detected: RFC 3339, RFC 2822,
    /// `YYYY-MM-DD hh:mm:ss` and its variants, compact `YYYYMMDD`, unix timestamps, and the
    /// keywords `now`, `yesterday` and `tomorrow`.
    Parse {
        /// The value to parse
        value: String,

        /// A chrono strftime layout to parse with, such as `%d/%m/%Y`
        #[arg(long, conflicts_with = "format")]
        layout: Option<String>,

        /// A format in token notation to parse with, such as `d/m/Y`
        #[arg(short, long)]
        format: Option<String>,

        /// A format in token notation to print with. Omit to print the full value.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Prints a value with a format in token notation, such as `Y-m-d H:i:s`.
    Format {
        /// The value to format
        value: String,

        /// The format
        format: String,
    },

    /// Adds (or, with a negative count, subtracts) a number of units to a value.
    Add {
        /// The value to add to
        value: String,

        /// How many units to add
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// The unit
        #[arg(value_enum)]
        unit: UnitArg,

        /// Clamp to the last day of the target month instead of carrying into the next one. Only
        /// affects month-based units.
        #[arg(long)]
        no_overflow: bool,
    },

    /// Prints the difference between two values. Omit `TO` to compare with now.
    Diff {
        /// The start value
        from: String,

        /// The end value
        to: Option<String>,

        /// Print a phrase such as `3 days before` instead of a number
        #[arg(long, conflicts_with = "unit")]
        humans: bool,

        /// The unit to count in. Omit to use the largest unit with a non-zero count.
        #[arg(short, long, value_enum)]
        unit: Option<DiffUnitArg>,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn parse(config: &Config, value: &str) -> Result<Carbon, CarbonCliError> {
    checked(config.parse(value))
}

fn checked(c: Carbon) -> Result<Carbon, CarbonCliError> {
    match c.error() {
        Some(err) => Err(err.clone().into()),
        None => Ok(c),
    }
}

fn do_work(cli: Cli) -> Result<Output, CarbonCliError> {
    let config = cli.global.to_config()?;
    tracing::debug!(?config, "resolved config");

    match cli.command {
        Some(Commands::Parse {
            value,
            layout,
            format,
            output,
        }) => {
            let c = match (layout, format) {
                (Some(layout), _) => checked(config.parse_by_layout(&value, &layout))?,
                (None, Some(format)) => checked(config.parse_by_format(&value, &format))?,
                (None, None) => parse(&config, &value)?,
            };
            let printed = match output {
                Some(output) => c.format(&output),
                None => c.to_string(),
            };
            Ok((printed, 0))
        }
        Some(Commands::Format { value, format }) => {
            Ok((parse(&config, &value)?.format(&format), 0))
        }
        Some(Commands::Add {
            value,
            count,
            unit,
            no_overflow,
        }) => {
            let c = checked(unit.add(&parse(&config, &value)?, count, no_overflow))?;
            Ok((c.to_string(), 0))
        }
        Some(Commands::Diff {
            from,
            to,
            humans,
            unit,
        }) => {
            let from = parse(&config, &from)?;
            let to = to.map(|to| parse(&config, &to)).transpose()?;
            let printed = match (humans, unit) {
                (true, _) => from.diff_for_humans(to.as_ref()),
                (false, Some(unit)) => unit.diff(&from, to.as_ref()).to_string(),
                (false, None) => from.diff_in_string(to.as_ref()),
            };
            Ok((printed, 0))
        }
        None => unreachable!("clap should catch this no-subcommand case"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn run(args: &[&str]) -> Result<Output, CarbonCliError> {
        let cli = Cli::try_parse_from(std::iter::once("carbon").chain(args.iter().copied()))
            .unwrap();
        do_work(cli)
    }

    #[rstest]
    #[case(&["parse", "2020-08-05 13:14:15"], "2020-08-05 13:14:15 +0000 UTC")]
    #[case(&["parse", "2020-08-05 13:14:15", "--timezone", "PRC"], "2020-08-05 13:14:15 +0800 CST")]
    #[case(&["parse", "05/08/2020", "--layout", "%d/%m/%Y", "-o", "Y-m-d"], "2020-08-05")]
    #[case(&["parse", "05/08/2020", "--format", "d/m/Y", "-o", "l"], "Wednesday")]
    #[case(&["format", "2020-08-05", "F jK, Y"], "August 5th, 2020")]
    #[case(&["format", "2020-08-05", "F", "--locale", "zh-CN"], "八月")]
    #[case(&["add", "2020-01-31", "1", "months"], "2020-03-02 00:00:00 +0000 UTC")]
    #[case(&["add", "2020-01-31", "1", "months", "--no-overflow"], "2020-02-29 00:00:00 +0000 UTC")]
    #[case(&["add", "2020-03-01", "-1", "days"], "2020-02-29 00:00:00 +0000 UTC")]
    #[case(&["add", "2020-08-05", "90", "minutes"], "2020-08-05 01:30:00 +0000 UTC")]
    #[case(&["diff", "2020-08-05", "2020-08-08"], "3 days")]
    #[case(&["diff", "2020-08-05", "2020-08-08", "--unit", "hours"], "72")]
    #[case(&["diff", "2020-08-05", "2020-08-08", "--humans"], "3 days before")]
    #[case(&["diff", "2020-08-08", "2020-08-05"], "-3 days")]
    #[case(&["diff", "2020-08-05", "2020-08-05"], "just now")]
    fn test_commands(#[case] args: &[&str], #[case] expected: &str) {
        let (output, exit_code) = run(args).unwrap();
        assert_eq!(expected, output);
        assert_eq!(0, exit_code);
    }

    #[rstest]
    #[case(&["parse", "not a date"])]
    #[case(&["parse", "2020-08-05", "--timezone", "Mars/Olympus"])]
    #[case(&["parse", "2020-08-05", "--locale", "xx"])]
    #[case(&["parse", "2020-08-05", "--layout", "%d/%m/%Y"])]
    #[case(&["add", "2020-08-05", "9223372036854775807", "years"])]
    fn test_command_errors(#[case] args: &[&str]) {
        assert!(matches!(run(args), Err(CarbonCliError::LibraryError(_))));
    }

    #[test]
    fn test_cli_rejects() {
        assert!(Cli::try_parse_from(["carbon", "add", "2020-08-05", "1", "fortnights"]).is_err());
        assert!(Cli::try_parse_from(["carbon", "parse", "x", "--layout", "a", "--format", "b"]).is_err());
        assert!(Cli::try_parse_from(["carbon", "diff", "a", "--humans", "--unit", "days"]).is_err());
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["carbon", "-vv", "parse", "now"]).unwrap();
        assert_eq!(2, cli.global.verbose);
    }
}
