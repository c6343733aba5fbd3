use failure::Error;

use std::fmt::Debug;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use crate::log;
use crate::Interpreter;

impl Interpreter {
    /// run a file one line at a time, one expression per line. blank
    /// lines are skipped, and a line that fails is logged rather than
    /// aborting the rest of the file.
    pub fn run_file<P>(&self, path: P) -> Result<(), Error>
    where
        P: AsRef<Path> + Debug,
    {
        log::info(format!("running {:?}...", path));

        let file = File::open(path)?;
        let buf = BufReader::new(file);
        let mut lines = buf.lines();

        while let Some(Ok(line)) = lines.next() {
            if line.trim().is_empty() {
                continue;
            }

            if let Err(err) = self.run(line.as_str()) {
                log::warn("a line failed:");
                log::warn(line);
                log::warn(err);
            }
        }

        log::info("run_file: done");
        Ok(())
    }
}

// {{{ tests
#[cfg(test)]
mod tests {
    use crate::values::Value::Integer;
    use crate::Interpreter;
    use std::fs;
    use std::io::Write;

    #[test]
    fn run_file_skips_blanks_and_survives_bad_lines() {
        let path = std::env::temp_dir().join("parens_run_file_test.lisp");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "(define x 40)").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "(this line fails)").unwrap();
        writeln!(file, "(define y (+ x 2))").unwrap();
        drop(file);

        let session = Interpreter::new();
        session.run_file(&path).unwrap();
        assert_eq!(session.run("y").unwrap(), Integer(42));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn run_file_reports_a_missing_file() {
        let session = Interpreter::new();
        assert!(session.run_file("no-such-file.lisp").is_err());
    }
}
// }}}
