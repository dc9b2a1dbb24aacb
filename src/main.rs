//! regvm: register-based bytecode virtual machine

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use regvm::config::Config;
use regvm::loader;
use regvm::Vm;

/// Parsed command-line options.
struct Options {
    path: PathBuf,
    verbose: bool,
    stack_size: Option<usize>,
    video_size: Option<usize>,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <bytecode-file> [options]\n\
         \n\
         Options:\n\
         \x20 -v, --verbose            trace each instruction\n\
         \x20 -s, --stack-size <n>     main memory size in bytes\n\
         \x20     --video-size <n>     video region size in bytes\n\
         \x20 -h, --help               show this help",
        program
    )
}

/// Parse the command line. `Ok(None)` means help was requested.
fn parse_args() -> Result<Option<Options>, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("regvm");

    let mut path = None;
    let mut verbose = false;
    let mut stack_size = None;
    let mut video_size = None;

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage(program));
                return Ok(None);
            }
            "-v" | "--verbose" => verbose = true,
            "-s" | "--stack-size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a byte count", arg))?;
                stack_size = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid stack size '{}'", value))?,
                );
            }
            "--video-size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a byte count", arg))?;
                video_size = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid video size '{}'", value))?,
                );
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'\n\n{}", other, usage(program)));
            }
            other => {
                if path.replace(PathBuf::from(other)).is_some() {
                    return Err(format!("more than one bytecode file given\n\n{}", usage(program)));
                }
            }
        }
    }

    let path = path.ok_or_else(|| usage(program))?;
    Ok(Some(Options {
        path,
        verbose,
        stack_size,
        video_size,
    }))
}

fn run(options: &Options) -> anyhow::Result<u8> {
    let config = Config::get();
    let stack_size = options.stack_size.unwrap_or(config.stack_size);
    let video_size = options.video_size.unwrap_or(config.video_size);

    let program = loader::load_program(&options.path)?;

    let mut vm = Vm::new(stack_size, video_size);
    let code = vm.execute(&program, options.verbose)?;
    Ok(code)
}

fn main() -> ExitCode {
    let options = match parse_args() {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    // The instruction trace rides on debug-level logging; -v raises the
    // default filter so it shows up without drowning guest stdout.
    let mut builder = env_logger::Builder::from_default_env();
    if options.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    match run(&options) {
        Ok(code) => {
            println!("Program exited with code: {}", code);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
