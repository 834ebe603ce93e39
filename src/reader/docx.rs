//! DOCX読み込み
//!
//! `word/document.xml` の本文直下の段落を改行区切りで連結する。
//! 表の中の段落やヘッダー・フッターは対象外。

use crate::error::{CompareError, Result};
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn to_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| CompareError::format("DOCX", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| CompareError::format("DOCX", format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| CompareError::format("DOCX", e))?;

    document_text(&xml)
}

fn is_word(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(WORD_NS)
}

/// document.xml の本文テキスト
fn document_text(xml: &str) -> Result<String> {
    let doc = Document::parse(xml).map_err(|e| CompareError::format("DOCX", e))?;

    let Some(body) = doc.root_element().children().find(|n| is_word(n, "body")) else {
        return Ok(String::new());
    };

    let paragraphs: Vec<String> = body
        .children()
        .filter(|n| is_word(n, "p"))
        .map(|p| paragraph_text(&p))
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Node) -> String {
    let mut text = String::new();
    for node in paragraph.descendants() {
        if is_word(&node, "t") {
            if let Some(t) = node.text() {
                text.push_str(t);
            }
        } else if is_word(&node, "tab") {
            text.push('\t');
        } else if is_word(&node, "br") || is_word(&node, "cr") {
            text.push('\n');
        }
    }
    text
}
