use super::classifier::{Classification, classify, prettify};
use super::rows::build_rows;
use super::structural::StructuralDiff;
use super::types::{AttributeDiff, AttributeView, DisplayRow};
use crate::plan::{ActionAlias, AttributeChange};

/// Build the display form of one attribute change
pub fn diff_attribute(
    change: &AttributeChange,
    action_alias: ActionAlias,
    differ: &dyn StructuralDiff,
) -> AttributeDiff {
    let view = match classify(&change.before, &change.after) {
        Classification::Identical => {
            AttributeView::Rows(vec![DisplayRow::Identical(prettify(&change.before))])
        }
        Classification::BothJson(before, after) => {
            AttributeView::Rows(build_rows(&differ.diff(&before, &after)))
        }
        Classification::Mixed => AttributeView::Blocks {
            before: prettify(&change.before),
            after: prettify(&change.after),
        },
    };

    AttributeDiff {
        field: change.field.clone(),
        action_alias,
        view,
    }
}
