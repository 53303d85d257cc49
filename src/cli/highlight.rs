use crate::highlight::{HighlightCategory, HighlightToken, Highlighter};
use crate::pathlib::FilePath;

use super::OnError;

use colored::{Color, Colorize};
use itertools::Itertools;
use serde_json::json;
use std::fs;
use std::time::Instant;

fn category_color(category: HighlightCategory) -> Option<Color> {
    let color = match category {
        HighlightCategory::ClassName => Color::Cyan,
        HighlightCategory::FunctionName => Color::Blue,
        HighlightCategory::ImportName => Color::BrightYellow,
        HighlightCategory::Integer | HighlightCategory::Float => Color::Yellow,
        HighlightCategory::Keyword
        | HighlightCategory::SelfOrSuper
        | HighlightCategory::AnyKeyword => Color::Magenta,
        HighlightCategory::String | HighlightCategory::StringInterpolationAnchor => Color::Red,
        HighlightCategory::AtSign => Color::BrightMagenta,
        HighlightCategory::LineComment | HighlightCategory::BlockComment => Color::Green,
        HighlightCategory::Identifier
        | HighlightCategory::OperatorOrPunctuation
        | HighlightCategory::Newline
        | HighlightCategory::Unknown => return None,
    };
    Some(color)
}

fn pretty_line(tok: &HighlightToken) -> String {
    let category = format!("{:<26}", tok.category.name());
    let category = match category_color(tok.category) {
        Some(color) => category.color(color).to_string(),
        None => category,
    };
    format!(
        "{:>6}..{:<6} {} {:?}",
        tok.position.start, tok.position.end, category, tok.text
    )
}

fn print_tokens(tokens: &[HighlightToken], pretty: bool) {
    if pretty {
        println!("{}", tokens.iter().map(pretty_line).join("\n"));
        return;
    }

    match serde_json::to_string(tokens) {
        Ok(s) => println!("{}", s),
        Err(err) => log::error!("could not serialize tokens: {}", err),
    }
}

pub(super) fn action(filepath: &FilePath, on_error: OnError, pretty: bool) {
    let start_time = Instant::now();
    log::info!("highlighting {}", filepath);

    let highlighter = Highlighter::new();
    match highlighter.highlight_file(filepath) {
        Ok(tokens) => print_tokens(&tokens, pretty),
        Err(err) => {
            let source = fs::read_to_string(filepath).ok();
            err.emit(Some(filepath), source.as_deref());
            match on_error {
                OnError::Empty => println!("[]"),
                OnError::Diagnostic => println!("{}", json!([{ "error": err.to_string() }])),
            }
            return;
        }
    }

    let elapsed = start_time.elapsed();
    log::info!("highlighted in {:?}", elapsed);
}
