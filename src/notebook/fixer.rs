//! Widget Metadata Fixer
//!
//! Pure, in-place repair of `metadata.widgets` entries. No I/O happens here.

use serde_json::{Map, Value};

use super::{CELLS_KEY, METADATA_KEY, STATE_KEY, WIDGETS_KEY};

/// How a present `widgets` entry is repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    /// Add an empty `state` mapping when it is missing
    #[default]
    InsertState,
    /// Delete the whole `widgets` entry, whatever its shape
    RemoveWidgets,
}

impl FixMode {
    pub fn from_remove_widgets(remove_widgets: bool) -> Self {
        if remove_widgets {
            FixMode::RemoveWidgets
        } else {
            FixMode::InsertState
        }
    }
}

/// Boolean form of [`fix_widgets_metadata`]
pub fn fix(notebook: &mut Value, remove_widgets: bool) -> bool {
    fix_widgets_metadata(notebook, FixMode::from_remove_widgets(remove_widgets))
}

/// Repair the notebook-level and every cell-level `metadata.widgets` entry.
///
/// Returns true if anything was modified. Shapes that do not match the
/// notebook layout (a non-object `metadata`, non-array `cells`, a `widgets`
/// value that is not a mapping in insert mode) are skipped without error.
pub fn fix_widgets_metadata(notebook: &mut Value, mode: FixMode) -> bool {
    let mut changed = fix_metadata_at(notebook, mode);

    if let Some(Value::Array(cells)) = notebook.get_mut(CELLS_KEY) {
        for cell in cells.iter_mut() {
            // Evaluate every cell; do not short-circuit on `changed`.
            changed |= fix_metadata_at(cell, mode);
        }
    }

    changed
}

/// Apply the fix to the `metadata` mapping of a notebook or cell object.
fn fix_metadata_at(owner: &mut Value, mode: FixMode) -> bool {
    match owner.get_mut(METADATA_KEY) {
        Some(Value::Object(metadata)) => fix_widgets_entry(metadata, mode),
        _ => false,
    }
}

fn fix_widgets_entry(metadata: &mut Map<String, Value>, mode: FixMode) -> bool {
    if !metadata.contains_key(WIDGETS_KEY) {
        return false;
    }

    match mode {
        FixMode::RemoveWidgets => {
            metadata.shift_remove(WIDGETS_KEY);
            true
        }
        FixMode::InsertState => match metadata.get_mut(WIDGETS_KEY) {
            Some(Value::Object(widgets)) if !widgets.contains_key(STATE_KEY) => {
                widgets.insert(STATE_KEY.to_string(), Value::Object(Map::new()));
                true
            }
            // Already complete, or not a mapping at all.
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_widgets_is_unchanged() {
        let mut nb = json!({
            "metadata": {"kernelspec": {"name": "python3"}},
            "cells": [{"metadata": {"tags": ["x"]}, "source": []}]
        });
        let before = nb.clone();

        assert!(!fix(&mut nb, false));
        assert!(!fix(&mut nb, true));
        assert_eq!(nb, before);
    }

    #[test]
    fn test_insert_state_preserves_other_entries() {
        let mut nb = json!({"metadata": {"widgets": {"a": 1, "b": [1, 2]}}, "cells": []});

        assert!(fix(&mut nb, false));
        assert_eq!(
            nb["metadata"]["widgets"],
            json!({"a": 1, "b": [1, 2], "state": {}})
        );
    }

    #[test]
    fn test_existing_state_is_left_alone() {
        let mut nb = json!({"metadata": {"widgets": {"state": {"k": "v"}}}});
        let before = nb.clone();

        assert!(!fix(&mut nb, false));
        assert_eq!(nb, before);
    }

    #[test]
    fn test_non_mapping_widgets_ignored_in_insert_mode() {
        let mut nb = json!({
            "metadata": {"widgets": "broken"},
            "cells": [{"metadata": {"widgets": [1, 2, 3]}}, {"metadata": {"widgets": null}}]
        });
        let before = nb.clone();

        assert!(!fix(&mut nb, false));
        assert_eq!(nb, before);
    }

    #[test]
    fn test_remove_deletes_any_shape() {
        let mut nb = json!({
            "metadata": {"widgets": 42, "language_info": {}},
            "cells": [
                {"metadata": {"widgets": {"state": {}}}},
                {"metadata": {"widgets": null, "collapsed": true}},
                {"metadata": {}}
            ]
        });

        assert!(fix(&mut nb, true));
        assert_eq!(nb["metadata"], json!({"language_info": {}}));
        assert_eq!(nb["cells"][0]["metadata"], json!({}));
        assert_eq!(nb["cells"][1]["metadata"], json!({"collapsed": true}));
        assert_eq!(nb["cells"][2]["metadata"], json!({}));
    }

    #[test]
    fn test_cells_fixed_independently() {
        let mut nb = json!({
            "metadata": {"widgets": {"version": 2}},
            "cells": [
                {"metadata": {"widgets": {}}},
                {"metadata": {"widgets": {"state": {"x": 1}}}},
                {"metadata": {"widgets": {"other": true}}}
            ]
        });

        assert!(fix(&mut nb, false));
        assert_eq!(nb["metadata"]["widgets"]["state"], json!({}));
        assert_eq!(nb["cells"][0]["metadata"]["widgets"], json!({"state": {}}));
        assert_eq!(
            nb["cells"][1]["metadata"]["widgets"],
            json!({"state": {"x": 1}})
        );
        assert_eq!(
            nb["cells"][2]["metadata"]["widgets"],
            json!({"other": true, "state": {}})
        );
    }

    #[test]
    fn test_cell_only_change_is_reported() {
        let mut nb = json!({"metadata": {}, "cells": [{"metadata": {"widgets": {}}}]});
        assert!(fix(&mut nb, false));
    }

    #[test]
    fn test_malformed_layout_is_skipped() {
        let mut cases = vec![
            json!([1, 2, 3]),
            json!({"metadata": "nope", "cells": "nope"}),
            json!({"cells": [1, "two", null, {"metadata": []}]}),
            json!(null),
        ];
        for nb in cases.iter_mut() {
            let before = nb.clone();
            assert!(!fix(nb, false));
            assert!(!fix(nb, true));
            assert_eq!(*nb, before);
        }
    }

    #[test]
    fn test_idempotent() {
        let original = json!({
            "metadata": {"widgets": {"a": 1}},
            "cells": [{"metadata": {"widgets": {}}}]
        });

        for mode in [FixMode::InsertState, FixMode::RemoveWidgets] {
            let mut nb = original.clone();
            assert!(fix_widgets_metadata(&mut nb, mode));
            let once = nb.clone();
            assert!(!fix_widgets_metadata(&mut nb, mode));
            assert_eq!(nb, once);
        }
    }

    #[test]
    fn test_key_order_preserved() {
        let text = r#"{"metadata": {"widgets": {"z": 1, "a": 2}, "kernelspec": {}}, "cells": []}"#;
        let mut nb: Value = serde_json::from_str(text).unwrap();

        assert!(fix(&mut nb, false));
        let keys: Vec<&str> = nb["metadata"]["widgets"]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["z", "a", "state"]);

        assert!(fix(&mut nb, true));
        let keys: Vec<&str> = nb["metadata"]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["kernelspec"]);
    }
}
