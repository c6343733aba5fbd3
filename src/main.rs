mod log;

use itertools::join;
use std::path::PathBuf;

use parens::values::Value;
use parens::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::Editor;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short = "d", long = "debug")]
    debug: bool,

    #[structopt(
        name = "INITFILE",
        parse(from_os_str),
        help = "file of definitions to run on startup"
    )]
    initfile: Option<PathBuf>,
}

const HISTFILE: &str = ".parens_hist";

fn main() {
    let opt = Opt::from_args();
    if opt.debug {
        log::debug(format!("set options: {:?}", opt))
    }

    let interpreter = Interpreter::new();
    if let Some(initfile) = &opt.initfile {
        if let Err(why) = interpreter.run_file(initfile) {
            log::warn(why);
        }
    }

    let mut rl = Editor::<()>::new();
    if let Err(err) = rl.load_history(HISTFILE) {
        log::warn(format!("error opening history file: {}", err));
    }

    let prompt = format!("{}parens λ{} ", "\x1b[1;94m", log::RESET);

    loop {
        let input = rl.readline(&prompt);

        match input {
            Ok(line) => {
                if !line.is_empty() {
                    if line.starts_with('>') && line.len() > 1 {
                        println!("{}", command(&interpreter, &line[1..]));
                    } else {
                        rl.add_history_entry::<&str>(line.as_ref());

                        if opt.debug {
                            if let Ok(expr) = Value::parse(&line) {
                                log::debug(format!("{:?}", expr));
                            }
                        }

                        match interpreter.run(line) {
                            Ok(result) => println!("{}", result),
                            Err(err) => log::error(err),
                        }
                    }
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }

            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }

            Err(err) => {
                log::error(err);
                break;
            }
        }
    }

    rl.save_history(HISTFILE).unwrap();
}

fn command(interpreter: &Interpreter, cmd: &str) -> String {
    match cmd {
        "env" => join(interpreter.env.borrow().vars.keys(), ", "),
        _ => "invalid command".to_owned(),
    }
}
