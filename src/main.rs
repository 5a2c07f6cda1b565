use std::env::args;
use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::io::BufReader;
use std::rc::Rc;

use anyhow::{Context, Result};

use monoxide::{eval_program, parse, Environment, Object};

fn main() -> Result<()> {
    let args = args();
    if args.len() > 2 {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all("Usage: monoxide [script]".as_bytes())
            .unwrap();
        std::process::exit(64);
    } else if args.len() == 2 {
        // Size is validated
        let script_path = args.skip(1).next().unwrap();
        let mut file = File::open(script_path).context("Unable to open script file")?;
        let mut script = String::new();
        file.read_to_string(&mut script)
            .context("Unable to read script file")?;
        run_script(&script);
    } else {
        run_prompt()?;
    }
    Ok(())
}

fn run_script(script: &str) {
    match parse(script) {
        Ok(program) => {
            let env = Environment::new();
            if let Object::Error(message) = eval_program(&program, &env) {
                eprintln!("ERROR: {}", message);
                std::process::exit(70);
            }
        }
        Err(errors) => {
            // A partial AST must not be evaluated; list everything we found
            for error in &errors {
                eprintln!("{}", error);
            }
            std::process::exit(65);
        }
    }
}

fn run_prompt() -> Result<()> {
    let stdin = std::io::stdin().lock();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();
    // One environment for the whole session so let bindings persist
    let env = Environment::new();
    loop {
        {
            let mut stdout = stdout().lock();
            stdout.write_all("> ".as_bytes())?;
            stdout.flush()?;
        }
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            break;
        }
        run_line(&line, &env);
        // Don't keep appending code until the next time
        line.clear();
    }
    Ok(())
}

fn run_line(line: &str, env: &Rc<Environment>) {
    match parse(line) {
        Ok(program) => match eval_program(&program, env) {
            Object::Null => {}
            Object::Error(message) => eprintln!("ERROR: {}", message),
            value => println!("{}", value),
        },
        Err(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
        }
    }
}
