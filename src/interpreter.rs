/// Input and output for `read` and `write`.
///
/// Defines the `Console` trait the interpreter talks to, the standard
/// stream implementation, and a scripted one for tests.
pub mod console;
/// Lexical predicates over raw source text.
///
/// Decides what a fragment looks like before it is parsed: numbers, quoted
/// text, names, operators and characteristic accesses.
pub mod classifier;
/// The evaluator module computes values from expression fragments.
///
/// The evaluator classifies a fragment, parses it when needed, walks the
/// resulting tree and produces a value. It also owns the interpreter state:
/// variables, the current file and line, and the console.
///
/// # Responsibilities
/// - Evaluates every expression form of the language.
/// - Performs arithmetic, comparison and logical operations.
/// - Reports errors such as division by zero or unknown names.
pub mod evaluator;
/// The lexer module tokenizes expression fragments for parsing.
///
/// The lexer reads the text of a fragment and produces a stream of tokens
/// for numbers, text, keywords, names, operators and delimiters.
pub mod lexer;
/// Resolution and execution of `use` statements.
pub mod module;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents one expression fragment.
///
/// # Responsibilities
/// - Converts tokens into expression nodes with the usual precedence.
/// - Validates the grammar, reporting errors at the current location.
pub mod parser;
/// Line classification and dispatch.
///
/// Turns each source line into a statement and executes it: `write`,
/// assignment, `use`, `read`, comments and blank lines.
pub mod statement;
/// The value module defines the runtime data types.
///
/// # Responsibilities
/// - Defines the `Value` enum and its type names.
/// - Implements characteristics, truthiness and display forms.
/// - Provides exact decimal arithmetic.
pub mod value;
