//! Generated single-cell tables run through the whole JSON round.

use codecell_filter::filter::{run_json, CodeTableFilter};
use proptest::prelude::*;
use serde_json::{json, Value};

fn document_with_cell(lines: &[String]) -> String {
    let mut inlines = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            inlines.push(json!({"t": "LineBreak"}));
        }
        inlines.push(json!({"t": "Str", "c": line}));
    }
    let attr = json!(["", [], []]);
    let cell = json!([attr, {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": inlines}]]);
    let table = json!({"t": "Table", "c": [
        attr,
        [null, []],
        [[{"t": "AlignDefault"}, {"t": "ColWidthDefault"}]],
        [attr, [[attr, [cell]]]],
        [],
        [attr, []]
    ]});
    json!({
        "pandoc-api-version": [1, 23, 1],
        "meta": {},
        "blocks": [table]
    })
    .to_string()
}

proptest! {
    #[test]
    fn every_line_lands_in_one_cell(lines in prop::collection::vec("[a-z0-9(){};=]{1,12}", 1..6)) {
        let output = run_json(&document_with_cell(&lines), &CodeTableFilter::default()).unwrap();
        let doc: Value = serde_json::from_str(&output).unwrap();

        let expected = format!("| Code |\n|------|\n| {} |", lines.join(" <br> "));
        prop_assert_eq!(
            &doc["blocks"],
            &json!([{"t": "RawBlock", "c": ["markdown", expected]}])
        );
    }
}
