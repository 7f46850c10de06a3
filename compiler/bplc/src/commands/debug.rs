//! Debug commands: `lex` and `parse` for inspecting the front end.

use bpl_ir::{Program, StmtKind, StringInterner, Token, TokenKind};

use super::{open_session, read_file, report_and_exit};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let session = open_session(path);

    let tokens = match session.lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => report_and_exit(&err, &source, path),
    };

    println!("Tokens for '{}' ({} tokens):", path, tokens.len());
    for token in tokens.iter() {
        println!("  {}", describe_token(token, session.interner()));
    }
}

/// Parse a file and display a summary of the program.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let session = open_session(path);

    let program = match session.parse(&source) {
        Ok(program) => program,
        Err(err) => report_and_exit(&err, &source, path),
    };

    println!("Parse result for '{path}':");
    println!("  Statements: {}", program.statements.len());

    let functions = function_signatures(&program, session.interner());
    if !functions.is_empty() {
        println!();
        println!("Functions:");
        for signature in functions {
            println!("  {signature}");
        }
    }
}

fn describe_token(token: &Token, interner: &StringInterner) -> String {
    match token.kind {
        TokenKind::Ident(name) => format!("Ident({}) @ {}", interner.lookup(name), token.pos),
        TokenKind::Str(name) => format!("Str({:?}) @ {}", interner.lookup(name), token.pos),
        TokenKind::Float(bits) => format!("Float({:?}) @ {}", f64::from_bits(bits), token.pos),
        _ => format!("{token:?}"),
    }
}

/// `name(params) @ line:col` for every top-level function definition.
fn function_signatures(program: &Program, interner: &StringInterner) -> Vec<String> {
    program
        .statements
        .iter()
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::FunctionDef(def) => {
                let params: Vec<_> = def.params.iter().map(|p| interner.lookup(p.name)).collect();
                Some(format!(
                    "{}({}) @ {}",
                    interner.lookup(def.name.name),
                    params.join(", "),
                    def.pos
                ))
            }
            _ => None,
        })
        .collect()
}
