use failure::Fail;

/// failures while slicing source text into tokens
#[derive(Debug, Fail)]
pub enum LexError {
    #[fail(display = "unterminated string literal")]
    UnterminatedString,
}

/// failures of expression shape, found while parsing tokens or while
/// applying a special form to arguments of the wrong count or kind
#[derive(Debug, Fail)]
pub enum SyntaxError {
    #[fail(display = "unexpected end of input")]
    UnexpectedEndOfInput,

    #[fail(display = "unexpected ')'")]
    UnexpectedCloseParen,

    #[fail(display = "unexpected end of input while reading a list")]
    UnterminatedList,

    #[fail(display = "unexpected '{}' after expression", _0)]
    TrailingToken(String),

    #[fail(display = "bad syntax in {}: {}", form, reason)]
    BadForm {
        form: &'static str,
        reason: &'static str,
    },

    #[fail(display = "bad syntax in '{}'", _0)]
    ReservedSymbol(String),
}

/// failures during evaluation
#[derive(Debug, Fail)]
pub enum RunError {
    #[fail(display = "undefined symbol {}", _0)]
    UnboundSymbol(String),

    #[fail(display = "value `{}` (of type {}) is uncallable", name, typename)]
    UncallableValue { name: String, typename: String },

    #[fail(display = "{}: expected {} args, got {}", name, expected, got)]
    WrongNumArgs {
        name: String,
        expected: usize,
        got: usize,
    },

    #[fail(display = "{}: expected a {}, got a {} instead", name, expected, got)]
    TypeError {
        name: String,
        expected: String,
        got: String,
    },

    #[fail(display = "{}: {}", name, msg)]
    ProcError { name: String, msg: String },

    #[fail(display = "division by zero is undefined")]
    DivideByZero,
}
