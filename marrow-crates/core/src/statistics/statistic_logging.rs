use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;

/// Where and how statistics are printed; set once through [`configure_statistic_logging`].
pub struct StatisticOptions {
    prefix: &'static str,
    block_terminator: Option<&'static str>,
    casing: Option<Case>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("block_terminator", &self.block_terminator)
            .field("casing", &self.casing)
            .finish_non_exhaustive()
    }
}

impl StatisticOptions {
    fn write_line(&self, line: impl Display) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{line}");
        }
    }

    fn format_name(&self, name: impl Display) -> String {
        match self.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        }
    }
}

static OPTIONS: OnceLock<StatisticOptions> = OnceLock::new();

/// Enables statistic logging. Only the first call has an effect.
///
/// Every statistic is written as `{prefix} {name}={value}`, with the name converted to `casing`
/// when one is given; `after` is written once all statistics of a block have been written. The
/// writer defaults to stdout.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = OPTIONS.get_or_init(|| StatisticOptions {
        prefix,
        block_terminator: after,
        casing,
        writer: Mutex::new(writer.unwrap_or_else(|| Box::new(std::io::stdout()))),
    });
}

pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(options) = OPTIONS.get() {
        let name = options.format_name(name);
        options.write_line(format_args!("{} {name}={value}", options.prefix));
    }
}

/// Ends a block of statistics.
pub fn log_statistic_postfix() {
    if let Some(options) = OPTIONS.get() {
        if let Some(terminator) = options.block_terminator {
            options.write_line(terminator);
        }
    }
}

pub fn should_log_statistics() -> bool {
    OPTIONS.get().is_some()
}
