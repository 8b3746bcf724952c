/*
 * EVM code validator
 *
 * Runs the cases of a JSON fixture file through the validator, or validates
 * hex encoded code given on the command line.
 *
 * - `cargo run` runs `./validate.json`
 * - `cargo run -- other.json` runs another fixture file
 * - `cargo run -- -vvv --code 0x5b00` validates one code buffer with debug logging
 */
use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use evm_code_validator::{code_hash, immediate, logger, opcodes, validate, ValidationError, Valids};
use serde::Deserialize;

const DEFAULT_FIXTURE: &str = "./validate.json";

#[derive(Debug, Deserialize)]
struct ValidateTest {
    name: String,
    hint: Option<String>,
    code: Code,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
struct Code {
    asm: Option<String>,
    bin: String,
}

#[derive(Debug, Deserialize)]
struct Expect {
    valid: bool,
    error: Option<String>,
    jumpdests: Option<Vec<usize>>,
}

#[derive(Parser, Debug)]
#[command(name = "evm-validate", about = "Static validator for EVM code")]
struct Args {
    /// Turn on verbose logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Hex encoded code to validate instead of running a fixture file.
    #[arg(long = "code", value_name = "HEX")]
    codes: Vec<String>,

    /// JSON file of validation cases.
    fixture: Option<PathBuf>,
}

fn decode(bin: &str) -> Result<Vec<u8>, String> {
    hex::decode(bin.trim_start_matches("0x")).map_err(|e| format!("invalid hex {}: {}", bin, e))
}

fn describe(outcome: &Result<Valids, ValidationError>) -> String {
    match outcome {
        Ok(valids) => format!("valid, jumpdests {:?}", valids.iter().collect::<Vec<_>>()),
        Err(err) => format!("invalid ({}): {}", err.kind(), err),
    }
}

fn disassemble(code: &[u8]) -> String {
    let mut lines = Vec::new();
    let mut pc = 0;
    while pc < code.len() {
        let name = opcodes::name(code[pc]).unwrap_or("UNDEFINED");
        let len = immediate::immediate_len(code, pc);
        let data = &code[(pc + 1).min(code.len())..(pc + 1 + len).min(code.len())];
        if data.is_empty() {
            lines.push(format!("{:04x}: {}", pc, name));
        } else {
            lines.push(format!("{:04x}: {} 0x{}", pc, name, hex::encode(data)));
        }
        pc += 1 + len;
    }
    lines.join("\n")
}

fn matches(expect: &Expect, outcome: &Result<Valids, ValidationError>) -> bool {
    match outcome {
        Ok(valids) => {
            expect.valid
                && expect
                    .jumpdests
                    .as_ref()
                    .map_or(true, |jumpdests| valids.iter().eq(jumpdests.iter().copied()))
        }
        Err(err) => {
            !expect.valid && expect.error.as_ref().map_or(true, |error| error == err.kind())
        }
    }
}

fn run_codes(codes: &[String]) -> Result<(), String> {
    for bin in codes {
        let code = decode(bin)?;
        let outcome = validate(&code);
        println!("{:?}: {}", code_hash(&code), describe(&outcome));
    }
    Ok(())
}

fn run_fixture(path: &Path) -> Result<(), String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("unable to read {}: {}", path.display(), e))?;
    let data: Vec<ValidateTest> = serde_json::from_str(&text)
        .map_err(|e| format!("unable to parse {}: {}", path.display(), e))?;

    let total = data.len();

    for (index, test) in data.into_iter().enumerate() {
        println!("Test {} of {}: {}", index + 1, total, test.name);

        let code = decode(&test.code.bin)?;
        let outcome = validate(&code);

        if !matches(&test.expect, &outcome) {
            let asm = test.code.asm.unwrap_or_else(|| disassemble(&code));
            println!("Code hash: {:?}", code_hash(&code));
            println!("Instructions: \n{}\n", asm);

            println!("Expected valid: {:?}", test.expect.valid);
            if let Some(error) = &test.expect.error {
                println!("Expected error: {}", error);
            }
            if let Some(jumpdests) = &test.expect.jumpdests {
                println!("Expected jumpdests: {:?}", jumpdests);
            }
            println!("Actual: {}\n", describe(&outcome));

            if let Some(hint) = test.hint {
                println!("\nHint: {}\n", hint);
            }
            println!("Progress: {}/{}\n\n", index, total);
            return Err(String::from("Test failed"));
        }
        println!("PASS");
    }
    println!("All {} cases passed", total);
    Ok(())
}

fn run(args: Args) -> Result<(), String> {
    logger::configure(args.verbose)?;

    if !args.codes.is_empty() {
        return run_codes(&args.codes);
    }
    let fixture = args.fixture.unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE));
    run_fixture(&fixture)
}

fn main() {
    if let Err(message) = run(Args::parse()) {
        eprintln!("{}", message);
        process::exit(1);
    }
}
