//! Spreadsheet import: tolerant HTML table extraction and heuristic
//! row-to-field mapping.
//!
//! The public spreadsheet is published as an HTML table with no stable
//! schema, so mapping is best effort: columns are guessed by position first
//! and header name second, category/region are matched by substring against
//! known Korean labels, and rows that cannot name a vendor are counted as
//! skipped rather than failing the run. Everything here is pure; fetching
//! and persistence live in `weddit-api` / `weddit-db`, fully isolated from
//! the selection engine.

use regex::RegexBuilder;
use serde::Serialize;

use crate::catalog::{Category, Region};
use crate::types::Won;

// ---------------------------------------------------------------------------
// HTML table extraction
// ---------------------------------------------------------------------------

/// Pull text rows out of the first HTML table-ish markup in `html`.
///
/// Case-insensitive tag scanning: every `<tr>` block contributes one row of
/// tag-stripped, entity-normalized `<td>` cell texts. Rows whose cells are
/// all empty are dropped.
pub fn extract_table_rows(html: &str) -> Vec<Vec<String>> {
    let row_re = RegexBuilder::new(r"<tr[^>]*>(.*?)</tr>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("static regex");
    let cell_re = RegexBuilder::new(r"<td[^>]*>(.*?)</td>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("static regex");

    row_re
        .captures_iter(html)
        .map(|row| {
            cell_re
                .captures_iter(&row[1])
                .map(|cell| clean_cell(&cell[1]))
                .collect::<Vec<String>>()
        })
        .filter(|cells| !cells.is_empty() && cells.iter().any(|c| !c.is_empty()))
        .collect()
}

/// Strip nested tags, decode the common entities, collapse whitespace.
fn clean_cell(raw: &str) -> String {
    let tag_re = RegexBuilder::new(r"<[^>]+>")
        .dot_matches_new_line(true)
        .build()
        .expect("static regex");
    let text = tag_re.replace_all(raw, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Field heuristics
// ---------------------------------------------------------------------------

/// Keep the digits, drop everything else ("1,500,000원" -> 1500000).
pub fn parse_price(raw: &str) -> Option<Won> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Substring-match a category label; full labels take precedence over the
/// one-character shorthands. Unknown text defaults to Studio.
pub fn parse_category(raw: &str) -> Category {
    const NEEDLES: [(&str, Category); 8] = [
        ("스튜디오", Category::Studio),
        ("드레스", Category::Dress),
        ("메이크업", Category::Makeup),
        ("웨딩홀", Category::WeddingHall),
        ("스", Category::Studio),
        ("드", Category::Dress),
        ("메", Category::Makeup),
        ("홀", Category::WeddingHall),
    ];
    let text = raw.trim();
    NEEDLES
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, cat)| *cat)
        .unwrap_or(Category::Studio)
}

/// Substring-match a region label ("서울 강남구" -> Seoul). Unknown text
/// defaults to Seoul.
pub fn parse_region(raw: &str) -> Region {
    let text = raw.trim();
    Region::ALL
        .iter()
        .copied()
        .find(|r| text.contains(r.label()))
        .unwrap_or(Region::Seoul)
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// One spreadsheet row mapped to vendor fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub vendor_name: String,
    pub category: Category,
    pub region: Region,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub item_name: Option<String>,
    pub price: Option<Won>,
}

/// Per-run outcome counts returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Pick a cell by fixed position, falling back to any of the given header
/// names. Empty cells count as absent.
fn cell(row: &[String], headers: &[String], fixed: usize, names: &[&str]) -> Option<String> {
    let by_position = row.get(fixed).filter(|c| !c.is_empty());
    let by_header = names.iter().find_map(|name| {
        let idx = headers.iter().position(|h| h == name)?;
        row.get(idx).filter(|c| !c.is_empty())
    });
    by_position.or(by_header).cloned()
}

/// Map one data row against the header row.
///
/// Returns `None` when the row names no vendor; the caller counts it as
/// skipped. Everything else degrades to defaults instead of failing, so one
/// messy row never corrupts another.
pub fn map_row(headers: &[String], row: &[String]) -> Option<MappedRow> {
    let vendor_name = cell(row, headers, 0, &["업체명", "이름", "상호"])?;

    let category = cell(row, headers, 1, &["카테고리", "분류", "구분"])
        .map(|c| parse_category(&c))
        .unwrap_or(Category::Studio);
    let region = cell(row, headers, 2, &["지역", "시도"])
        .map(|r| parse_region(&r))
        .unwrap_or(Region::Seoul);

    Some(MappedRow {
        vendor_name,
        category,
        region,
        address: cell(row, headers, 3, &["주소", "위치"]),
        phone: cell(row, headers, 4, &["전화번호", "연락처"]),
        website: cell(row, headers, 5, &["웹사이트", "홈페이지"]),
        item_name: cell(row, headers, 6, &["아이템", "상품명", "패키지"]),
        price: cell(row, headers, 7, &["가격", "금액"]).and_then(|p| parse_price(&p)),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    // -- HTML extraction --

    #[test]
    fn extracts_rows_and_cells() {
        let html = "<table><tbody>\
            <tr><td>업체명</td><td>카테고리</td></tr>\
            <tr><td>스냅성수</td><td>스튜디오</td></tr>\
            </tbody></table>";
        let rows = extract_table_rows(html);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], cells(&["스냅성수", "스튜디오"]));
    }

    #[test]
    fn extraction_is_case_insensitive_and_strips_nested_tags() {
        let html = "<TR><TD class=\"s1\"><span>가나</span> 스튜디오</TD></TR>";
        let rows = extract_table_rows(html);
        assert_eq!(rows, vec![cells(&["가나 스튜디오"])]);
    }

    #[test]
    fn extraction_decodes_entities_and_drops_blank_rows() {
        let html = "<tr><td>&nbsp;</td><td></td></tr>\
                    <tr><td>A&amp;B</td></tr>";
        let rows = extract_table_rows(html);
        assert_eq!(rows, vec![cells(&["A&B"])]);
    }

    #[test]
    fn extraction_of_tableless_html_is_empty() {
        assert!(extract_table_rows("<div>no table here</div>").is_empty());
    }

    // -- field heuristics --

    #[test]
    fn parse_price_strips_formatting() {
        assert_eq!(parse_price("1,500,000원"), Some(1_500_000));
        assert_eq!(parse_price("약 80만"), Some(80));
        assert_eq!(parse_price("미정"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn parse_category_matches_labels_and_shorthands() {
        assert_eq!(parse_category("스튜디오"), Category::Studio);
        assert_eq!(parse_category("드레스샵"), Category::Dress);
        assert_eq!(parse_category("메"), Category::Makeup);
        assert_eq!(parse_category("웨딩홀"), Category::WeddingHall);
        // Unknown text defaults to Studio.
        assert_eq!(parse_category("한복"), Category::Studio);
    }

    #[test]
    fn parse_region_matches_substring() {
        assert_eq!(parse_region("서울 강남구"), Region::Seoul);
        assert_eq!(parse_region("제주시 애월읍"), Region::Jeju);
        assert_eq!(parse_region("어딘가"), Region::Seoul);
    }

    // -- row mapping --

    #[test]
    fn map_row_by_position() {
        let headers = cells(&["업체명", "카테고리", "지역"]);
        let row = cells(&[
            "스냅성수",
            "스튜디오",
            "서울",
            "성수동 1가",
            "02-000-0000",
            "https://example.com",
            "기본 패키지",
            "1,500,000",
        ]);
        let mapped = map_row(&headers, &row).unwrap();
        assert_eq!(mapped.vendor_name, "스냅성수");
        assert_eq!(mapped.category, Category::Studio);
        assert_eq!(mapped.region, Region::Seoul);
        assert_eq!(mapped.address.as_deref(), Some("성수동 1가"));
        assert_eq!(mapped.item_name.as_deref(), Some("기본 패키지"));
        assert_eq!(mapped.price, Some(1_500_000));
    }

    #[test]
    fn map_row_falls_back_to_header_names() {
        // Vendor name lives under a shuffled header, position 0 is empty.
        let headers = cells(&["메모", "상호", "가격"]);
        let row = cells(&["", "더드레스", "2000000"]);
        let mapped = map_row(&headers, &row).unwrap();
        assert_eq!(mapped.vendor_name, "더드레스");
    }

    #[test]
    fn map_row_without_vendor_name_is_skipped() {
        let headers = cells(&["업체명"]);
        assert_eq!(map_row(&headers, &cells(&["", "", ""])), None);
    }

    #[test]
    fn map_row_with_item_but_no_price() {
        let headers = cells(&[]);
        let row = cells(&["업체", "드", "부산", "", "", "", "본식 패키지", "문의"]);
        let mapped = map_row(&headers, &row).unwrap();
        assert_eq!(mapped.category, Category::Dress);
        assert_eq!(mapped.region, Region::Busan);
        assert_eq!(mapped.item_name.as_deref(), Some("본식 패키지"));
        assert_eq!(mapped.price, None);
    }
}
