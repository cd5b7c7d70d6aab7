use std::borrow::Cow;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};

use log_units::{
    append_human_bytes, append_human_micros, append_number, consume_decimal_number,
    escape_string, number_to_human_string, BoundedWrite, DecimalCursor, Escaped,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: log_units <command>

commands:
  micros <N> [--fixed]   elapsed microseconds, e.g. 12345 -> 12.34ms
  bytes <N>              byte count, e.g. 1048576 -> 1.00MB
  count <N>              signed count, e.g. -25000 -> -25.00K
  number <N>             canonical decimal rendering
  escape [TEXT]          escape TEXT, or stdin when TEXT is omitted
  parse [FILE]           print the numeric fields of each line of FILE or stdin

Set RUST_LOG (default: info) to control diagnostics on stderr.";

/// Size of the first-attempt stack buffer for bounded rendering.
const STACK_BUF: usize = 16;

fn main() -> io::Result<()> {
    let (writer, _guard) = tracing_appender::non_blocking(io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .init();

    // Arguments may carry arbitrary bytes; `escape` relies on that.
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(&args, io::stdin().lock(), &mut out);
    if let Err(e) = &result {
        warn!(error = %e, "command failed");
        eprintln!("{}", USAGE);
    }
    result
}

fn run<R: BufRead, W: Write>(args: &[OsString], mut input: R, out: &mut W) -> io::Result<()> {
    let command = match args.first() {
        Some(cmd) => cmd
            .to_str()
            .ok_or_else(|| invalid(format!("unknown command {:?}", cmd)))?,
        None => return Err(invalid("missing command")),
    };

    match command {
        "micros" => {
            let micros = parse_u64(text_arg(args.get(1))?)?;
            let fixed = args.iter().skip(2).any(|a| a.as_os_str() == "--fixed");
            debug!(micros, fixed, "rendering elapsed time");
            write_bounded(out, |buf| append_human_micros(buf, micros, fixed))?;
        }
        "bytes" => {
            let bytes = parse_u64(text_arg(args.get(1))?)?;
            debug!(bytes, "rendering byte count");
            write_bounded(out, |buf| append_human_bytes(buf, bytes))?;
        }
        "count" => {
            let count = parse_i64(text_arg(args.get(1))?)?;
            debug!(count, "rendering count");
            out.write_all(number_to_human_string(count).as_bytes())?;
        }
        "number" => {
            let num = parse_u64(text_arg(args.get(1))?)?;
            write_bounded(out, |buf| append_number(buf, num))?;
        }
        "escape" => match args.get(1) {
            Some(text) => write!(out, "{}", Escaped(&os_bytes(text)))?,
            None => {
                let mut data = Vec::new();
                input.read_to_end(&mut data)?;
                debug!(len = data.len(), "escaping stdin");
                out.write_all(escape_string(&data).as_bytes())?;
            }
        },
        "parse" => {
            return match args.get(1) {
                Some(path) => parse_lines(BufReader::new(File::open(path)?), out),
                None => parse_lines(input, out),
            };
        }
        other => return Err(invalid(format!("unknown command {:?}", other))),
    }
    writeln!(out)
}

/// Renders into a stack buffer first and retries with an exact-size heap
/// buffer when the rendering was truncated.
fn write_bounded<W, F>(out: &mut W, render: F) -> io::Result<()>
where
    W: Write,
    F: Fn(&mut [u8]) -> BoundedWrite,
{
    let mut buf = [0u8; STACK_BUF];
    let res = render(&mut buf[..]);
    if !res.is_truncated() {
        return out.write_all(&buf[..res.written]);
    }
    debug!(required = res.required, capacity = STACK_BUF, "retrying with larger buffer");
    let mut big = vec![0u8; res.required];
    let res = render(&mut big[..]);
    out.write_all(&big[..res.written])
}

fn parse_lines<R: BufRead, W: Write>(mut reader: R, out: &mut W) -> io::Result<()> {
    let mut line = Vec::new();
    let mut line_no = 0usize;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        line_no += 1;
        let mut first = true;
        for field in DecimalCursor::new(&line).number_fields() {
            match field {
                Ok(value) => {
                    if !first {
                        out.write_all(b" ")?;
                    }
                    write!(out, "{}", value)?;
                    first = false;
                }
                Err(e) => warn!(line = line_no, error = %e, "skipping numeric field"),
            }
        }
        writeln!(out)?;
    }
}

/// Raw bytes of an argument. Off Unix, unpaired surrogates are replaced.
#[cfg(unix)]
fn os_bytes(arg: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(arg.as_bytes())
}

#[cfg(not(unix))]
fn os_bytes(arg: &OsStr) -> Cow<'_, [u8]> {
    match arg.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

fn text_arg(arg: Option<&OsString>) -> io::Result<&str> {
    let arg = arg.ok_or_else(|| invalid("missing numeric argument"))?;
    arg.to_str().ok_or_else(|| {
        invalid(format!(
            "argument is not valid UTF-8: {}",
            escape_string(&os_bytes(arg))
        ))
    })
}

fn parse_u64(text: &str) -> io::Result<u64> {
    let mut input = text.as_bytes();
    let value = consume_decimal_number(&mut input)
        .map_err(|e| invalid(format!("{:?}: {}", text, e)))?;
    if !input.is_empty() {
        return Err(invalid(format!(
            "unexpected characters after number: {}",
            escape_string(input)
        )));
    }
    Ok(value)
}

fn parse_i64(text: &str) -> io::Result<i64> {
    match text.strip_prefix('-') {
        Some(digits) => {
            let magnitude = parse_u64(digits)?;
            0i64.checked_sub_unsigned(magnitude)
                .ok_or_else(|| invalid(format!("{:?} is out of range", text)))
        }
        None => {
            let magnitude = parse_u64(text)?;
            i64::try_from(magnitude).map_err(|_| invalid(format!("{:?} is out of range", text)))
        }
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, msg.into())
}
