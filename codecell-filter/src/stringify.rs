//! Flattening nested content to plain text
//!
//! The normalizer only needs the text of a cell, not its structure. How structure is
//! collapsed is a policy of the host, so it sits behind the [`Stringify`] trait and is
//! handed to the normalizer. Closures implement the trait too, which keeps tests short.
//!
//! [`PlainStringify`] is the policy used by the filter binary. Line structure survives as
//! `\n` (hard line breaks, line blocks, separate paragraphs, code block text); everything
//! else collapses to its visible text.
//!
//! This differs from pandoc's own `stringify` (`pandoc.utils.stringify` in Lua filters) on
//! purpose. pandoc turns `LineBreak` into a space and quotes into typographic quote marks;
//! here a `LineBreak` becomes `\n` so the normalizer can encode it as `<br>`, and quotes
//! stay ASCII because the cells hold code. Callers that want pandoc's exact flattening can
//! pass their own [`Stringify`].

use pandoc_ast::{Block, Inline, QuoteType, Row};

/// Flatten a sequence of blocks into a single string.
pub trait Stringify {
    fn stringify(&self, blocks: &[Block]) -> String;
}

impl<F> Stringify for F
where
    F: Fn(&[Block]) -> String,
{
    fn stringify(&self, blocks: &[Block]) -> String {
        self(blocks)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStringify;

impl Stringify for PlainStringify {
    fn stringify(&self, blocks: &[Block]) -> String {
        blocks_text(blocks)
    }
}

/// Text of a block sequence. Blocks without text are skipped so they do not leave
/// stray blank lines behind.
fn blocks_text(blocks: &[Block]) -> String {
    join_nonempty(blocks.iter().map(block_text), "\n")
}

fn block_text(block: &Block) -> String {
    match block {
        Block::Plain(inlines) | Block::Para(inlines) | Block::Header(_, _, inlines) => {
            inlines_text(inlines)
        }
        Block::LineBlock(lines) => lines
            .iter()
            .map(|line| inlines_text(line))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock(_, text) | Block::RawBlock(_, text) => text.clone(),
        Block::BlockQuote(blocks) | Block::Div(_, blocks) => blocks_text(blocks),
        Block::OrderedList(_, items) | Block::BulletList(items) => {
            join_nonempty(items.iter().map(|item| blocks_text(item)), "\n")
        }
        Block::DefinitionList(entries) => join_nonempty(
            entries.iter().map(|(term, definitions)| {
                let definitions = definitions.iter().map(|d| blocks_text(d));
                join_nonempty(std::iter::once(inlines_text(term)).chain(definitions), "\n")
            }),
            "\n",
        ),
        Block::Table(_, _, _, (_, head_rows), bodies, (_, foot_rows)) => {
            let rows = head_rows
                .iter()
                .chain(bodies.iter().flat_map(|(_, _, head, body)| head.iter().chain(body.iter())))
                .chain(foot_rows.iter());
            join_nonempty(rows.map(row_text), "\n")
        }
        _ => String::new(),
    }
}

fn row_text((_, cells): &Row) -> String {
    join_nonempty(cells.iter().map(|(_, _, _, _, content)| blocks_text(content)), " ")
}

fn inlines_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_inlines(&mut out, inlines);
    out
}

fn push_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        push_inline(out, inline);
    }
}

fn push_inline(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Str(text)
        | Inline::Code(_, text)
        | Inline::Math(_, text)
        | Inline::RawInline(_, text) => out.push_str(text),
        Inline::Space | Inline::SoftBreak => out.push(' '),
        Inline::LineBreak => out.push('\n'),
        Inline::Quoted(kind, inlines) => {
            let quote = match kind {
                QuoteType::SingleQuote => '\'',
                QuoteType::DoubleQuote => '"',
            };
            out.push(quote);
            push_inlines(out, inlines);
            out.push(quote);
        }
        Inline::Emph(inlines)
        | Inline::Strong(inlines)
        | Inline::Strikeout(inlines)
        | Inline::Superscript(inlines)
        | Inline::Subscript(inlines)
        | Inline::SmallCaps(inlines)
        | Inline::Cite(_, inlines)
        | Inline::Link(_, inlines, _)
        | Inline::Image(_, inlines, _)
        | Inline::Span(_, inlines) => push_inlines(out, inlines),
        Inline::Note(_) => {}
        _ => {}
    }
}

fn join_nonempty(parts: impl Iterator<Item = String>, separator: &str) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
