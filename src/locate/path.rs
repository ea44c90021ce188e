// src/locate/path.rs

use scraper::{ElementRef, Html};
use std::fmt;

use crate::error::{PipelineError, Result};
use crate::process::utils::cell_value;

/// Which of the matching descendants a step selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Nth(usize),
    Last,
}

/// One "descend to the n-th `<tag>` below here" step. Matching counts every
/// descendant element with that tag, nested ones included, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descend {
    pub tag: &'static str,
    pub pick: Pick,
}

impl Descend {
    pub const fn nth(tag: &'static str, n: usize) -> Self {
        Self {
            tag,
            pick: Pick::Nth(n),
        }
    }

    pub const fn last(tag: &'static str) -> Self {
        Self {
            tag,
            pick: Pick::Last,
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pick::Nth(n) => write!(f, "{}", n),
            Pick::Last => f.write_str("last"),
        }
    }
}

/// Walk `path` from the document root. Any step without a candidate at its
/// position is `TableNotFound`.
pub fn follow<'a>(doc: &'a Html, path: &[Descend]) -> Result<ElementRef<'a>> {
    let mut current = doc.root_element();
    for (step, descend) in path.iter().enumerate() {
        let candidates: Vec<ElementRef<'a>> = current
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == descend.tag)
            .collect();
        let picked = match descend.pick {
            Pick::Nth(n) => candidates.get(n),
            Pick::Last => candidates.last(),
        };
        current = *picked.ok_or_else(|| PipelineError::TableNotFound {
            step,
            tag: descend.tag.to_string(),
            position: descend.pick.to_string(),
            available: candidates.len(),
        })?;
    }
    Ok(current)
}

/// Cleaned text content of an element, `None` when blank.
pub fn element_text(el: ElementRef<'_>) -> Option<String> {
    cell_value(&el.text().collect::<String>())
}

/// Rows of `table` as cell text. Rows of tables nested inside it are skipped;
/// cells are the `<td>`/`<th>` children of each row.
pub fn table_grid(table: ElementRef<'_>) -> Vec<Vec<Option<String>>> {
    table
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .filter(|tr| owning_table(*tr).map(|t| t.id()) == Some(table.id()))
        .map(|tr| {
            tr.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(element_text)
                .collect()
        })
        .collect()
}

fn owning_table(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "table")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <table id="outer">
          <tr><td>banner</td></tr>
          <tr><td>menu</td></tr>
          <tr><td>
            <table id="ad"><tr><td>ad</td></tr></table>
            <table id="data">
              <tr><th>Ticker</th><th>Name</th></tr>
              <tr><td>GME</td><td> GameStop
                 Corp </td></tr>
              <tr><td>AMC</td><td></td></tr>
            </table>
          </td></tr>
          <tr><td>Updated November 14, 2021</td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn test_follow_nested_path() {
        let doc = Html::parse_document(PAGE);
        let table = follow(
            &doc,
            &[
                Descend::nth("table", 0),
                Descend::nth("tr", 2),
                Descend::nth("table", 1),
            ],
        )
        .unwrap();
        assert_eq!(table.value().attr("id"), Some("data"));

        let grid = table_grid(table);
        assert_eq!(
            grid,
            vec![
                vec![Some("Ticker".to_string()), Some("Name".to_string())],
                vec![Some("GME".to_string()), Some("GameStop Corp".to_string())],
                vec![Some("AMC".to_string()), None],
            ]
        );
    }

    #[test]
    fn test_outer_grid_skips_nested_rows() {
        let doc = Html::parse_document(PAGE);
        let outer = follow(&doc, &[Descend::nth("table", 0)]).unwrap();
        assert_eq!(table_grid(outer).len(), 4);
    }

    #[test]
    fn test_last_pick() {
        let doc = Html::parse_document(PAGE);
        let cell = follow(
            &doc,
            &[
                Descend::nth("table", 0),
                Descend::last("tr"),
                Descend::nth("td", 0),
            ],
        )
        .unwrap();
        assert_eq!(
            element_text(cell).as_deref(),
            Some("Updated November 14, 2021")
        );
    }

    #[test]
    fn test_out_of_range_step() {
        let doc = Html::parse_document(PAGE);
        let err = follow(&doc, &[Descend::nth("table", 0), Descend::nth("tr", 42)]).unwrap_err();
        match err {
            PipelineError::TableNotFound {
                step, tag, position, ..
            } => {
                assert_eq!(step, 1);
                assert_eq!(tag, "tr");
                assert_eq!(position, "42");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let empty = Html::parse_document("<p>no tables today</p>");
        assert_eq!(
            follow(&empty, &[Descend::last("table")]).unwrap_err().kind(),
            "TableNotFound"
        );
    }
}
