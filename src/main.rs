use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use mifasm::assembler::{self, Assembly};
use mifasm::config::{self, Config};
use mifasm::dump;
use mifasm::error::AssemblerError;
use std::env;
use std::io;

fn main() {
    let config = match Config::try_from_args(env::args_os()) {
        Ok(config) => config,
        Err(e) if config::is_informational(&e) => e.exit(),
        Err(e) => {
            report(&config::usage_error(&e), None);
            std::process::exit(1);
        }
    };

    // The source is read up front so diagnostics can quote it.
    let source_text = match assembler::read_source(&config.input) {
        Ok(text) => text,
        Err(e) => {
            report(&e, None);
            std::process::exit(1);
        }
    };

    if let Err(e) = drive_assembler(&config, &source_text) {
        report(&e, Some(&source_text));
        std::process::exit(1);
    }
}

fn drive_assembler(config: &Config, source_text: &str) -> Result<(), AssemblerError> {
    let file = config.input.display().to_string();
    let assembly = assembler::assemble(source_text, &file, &config.options())?;

    if config.verbose {
        print_input_statistics(&assembly);
    }

    if config.dump_symbols {
        dump::dump_symbols(&assembly.labels);
    }
    if config.dump_code {
        if config.dump_symbols {
            println!();
        }
        dump::dump_code(&assembly);
    }
    if config.has_dumps() {
        println!("\n(No output file generated)");
        return Ok(());
    }

    assembler::write_image(&config.output, &assembly.image)?;

    // Default: silent on success
    if config.verbose {
        eprintln!("Wrote {}", config.output.display());
    }
    Ok(())
}

fn print_input_statistics(assembly: &Assembly) {
    eprintln!("Input:");
    eprintln!("  Lines:        {}", assembly.source_lines);
    eprintln!("  Labels:       {}", assembly.labels.len());
    eprintln!("  Instructions: {}", assembly.program.len());
    eprintln!("  Free words:   {}", assembly.image.free_words());
    eprintln!();
}

fn report(err: &AssemblerError, source_text: Option<&str>) {
    let message = match source_text {
        Some(text) => err.with_source_context(text),
        None => err.to_string(),
    };
    let (headline, context) = message.split_once('\n').unwrap_or((message.as_str(), ""));
    if io::stderr().is_tty() {
        eprintln!("{}", headline.red().bold());
    } else {
        eprintln!("{}", headline);
    }
    if !context.is_empty() {
        eprint!("{}", context);
    }
}
