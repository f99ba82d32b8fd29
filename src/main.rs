use {
    argh::FromArgs,
    culpa::{throw, throws},
    liso::{liso, Response},
    miette::{miette, Report},
    runelex::{error::RuntimeError, IdentifierScan, Scanner, Token, TokenKind},
    std::{
        fs::File,
        io::{BufRead, BufReader, Write},
    },
    tracing_subscriber::{EnvFilter, FmtSubscriber},
};

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SCRIPT: &str = "input.test";

/// Tokenize a source file, or lines typed at a prompt.
#[derive(FromArgs)]
struct Args {
    /// print version information
    #[argh(switch, short = 'v')]
    version: bool,

    /// tokenize lines typed at an interactive prompt
    #[argh(switch, short = 'i')]
    interactive: bool,

    /// scan whole words as identifiers instead of single letters
    #[argh(switch, short = 'g')]
    greedy_identifiers: bool,

    /// stop at the first illegal character
    #[argh(switch, short = 's')]
    strict: bool,

    /// source file, input.test when omitted
    #[argh(positional)]
    script: Vec<String>,
}

/// Driver settings shared by script and prompt mode.
#[derive(Clone, Copy)]
struct Options {
    identifier_scan: IdentifierScan,
    strict: bool,
}

fn main() -> miette::Result<()> {
    let args: Args = argh::from_env();

    // Only fails when a hook is already installed.
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .color(false) // liso doesn't handle color codes well..
                .context_lines(3)
                .build(),
        )
    }));

    init_tracing();

    run(args).map_err(Report::new)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // Only fails when a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[throws(RuntimeError)]
fn run(args: Args) {
    if args.version {
        println!("{} {}", APP_NAME, APP_VERSION);
        return;
    }

    if args.script.len() > 1 {
        throw!(RuntimeError::Usage(miette!("{} [-i] [-g] [-s] [script file]", APP_NAME)));
    }

    let options = Options {
        identifier_scan: if args.greedy_identifiers {
            IdentifierScan::Greedy
        } else {
            IdentifierScan::SingleLetter
        },
        strict: args.strict,
    };

    if args.interactive {
        run_repl(options)?;
    } else {
        let script = args.script.first().map_or(DEFAULT_SCRIPT, String::as_str);
        run_script(options, script)?;
    }
}

#[throws(RuntimeError)]
fn run_script(options: Options, script: &str) {
    tracing::debug!(script, "tokenizing file");
    let file = BufReader::new(File::open(script)?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit_tokens(file, options, |token| {
        writeln!(out, "{}", token)?;
        Ok(())
    })?;
}

#[throws(RuntimeError)]
fn run_repl(options: Options) {
    let mut io = liso::InputOutput::new();
    io.prompt(liso!(fg = green, bold, "> ", reset), true, false);
    loop {
        match io.read_blocking() {
            Response::Input(line) => {
                let source = line.as_str();
                io.echoln(liso!(fg = green, dim, "> ", fg = none, source));
                // Every line gets a fresh scanner: a scanner is done after EndOfInput.
                let result = emit_tokens(source.as_bytes(), options, |token| {
                    io.println(liso!(token.to_string()));
                    Ok(())
                });
                if let Err(e) = result {
                    io.println(liso!(
                        fg = red,
                        bold,
                        format!("{:?}", Report::new(e)),
                        fg = none
                    ));
                }
            }
            Response::Discarded(line) => {
                io.echoln(liso!(bold + dim, "X ", -bold, line));
            }
            Response::Dead => break,
            Response::Quit => break,
            Response::Finish => break,
            _ => {}
        }
    }
}

/// Scan `reader` to the end, handing every token before `EndOfInput` to `emit`.
#[throws(RuntimeError)]
fn emit_tokens(
    reader: impl BufRead,
    options: Options,
    mut emit: impl FnMut(&Token) -> Result<(), RuntimeError>,
) {
    let scanner = Scanner::new(reader).with_identifier_scan(options.identifier_scan);
    for token in scanner.tokens() {
        let token = token?;
        if options.strict && token.kind == TokenKind::Illegal {
            throw!(RuntimeError::IllegalCharacter {
                character: token.literal,
                position: token.position,
            });
        }
        emit(&token)?;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, runelex::SourcePosition};

    fn options(strict: bool) -> Options {
        Options {
            identifier_scan: IdentifierScan::SingleLetter,
            strict,
        }
    }

    #[test]
    fn lenient_mode_passes_illegal_tokens_through() {
        let mut lines = vec![];
        emit_tokens(&b"1 # 2"[..], options(false), |token| {
            lines.push(token.to_string());
            Ok(())
        })
        .unwrap();
        assert_eq!(lines, vec!["1:1\tINT\t1", "1:3\tILLEGAL\t#", "1:5\tINT\t2"]);
    }

    #[test]
    fn strict_mode_stops_at_first_illegal_character() {
        let mut lines = vec![];
        let result = emit_tokens(&b"1 # 2"[..], options(true), |token| {
            lines.push(token.to_string());
            Ok(())
        });
        match result {
            Err(RuntimeError::IllegalCharacter {
                character,
                position,
            }) => {
                assert_eq!(character, "#");
                assert_eq!(position, SourcePosition::new(1, 3));
            }
            other => panic!("expected an illegal character error, got {:?}", other),
        }
        assert_eq!(lines, vec!["1:1\tINT\t1"]);
    }
}
