//! Token dump tool: print every preprocessing token of one input.
//!
//! Usage: `scc [--json] <file.c | ->`

use std::env;
use std::process;

use serde::Serialize;

use scc::lexer::{Lexer, Token, TokenKind};

/// One `--json` output line.
#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    text: String,
    file: &'a str,
    line: u32,
    column: u32,
    bol: bool,
    space: bool,
}

fn kind_name(kind: &TokenKind) -> &'static str {
    match kind {
        TokenKind::Ident(_) => "ident",
        TokenKind::Punct(_) => "punct",
        TokenKind::Number(_) => "number",
        TokenKind::Char { .. } => "char",
        TokenKind::Str { .. } => "string",
        TokenKind::Space => "space",
        TokenKind::Newline => "newline",
        TokenKind::Invalid(_) => "invalid",
        TokenKind::Eof => "eof",
    }
}

fn record(tok: &Token) -> TokenRecord<'_> {
    TokenRecord {
        kind: kind_name(&tok.kind),
        text: tok.kind.to_string(),
        file: &tok.file.name,
        line: tok.line,
        column: tok.column,
        bol: tok.bol,
        space: tok.space,
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let (json, path) = match args.as_slice() {
        [path] => (false, path.as_str()),
        [flag, path] if flag == "--json" => (true, path.as_str()),
        _ => {
            eprintln!("usage: scc [--json] <file.c | ->");
            process::exit(2);
        }
    };

    let mut lexer = Lexer::from_file(path).unwrap_or_else(|e| {
        eprintln!("scc: {e}");
        process::exit(1);
    });
    let tokens = lexer.tokenize().unwrap_or_else(|e| {
        eprintln!("scc: {e}");
        process::exit(1);
    });

    for tok in &tokens {
        if json {
            match serde_json::to_string(&record(tok)) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("scc: {e}");
                    process::exit(1);
                }
            }
        } else {
            println!("{}:{}:{}\t{}", tok.file.name, tok.line, tok.column, tok);
        }
    }
    for w in lexer.warnings() {
        eprintln!("scc: {}: warning: {}", w.pos, w.message);
    }
}
