//! End-to-end scan pipeline tests: classify, extract, aggregate, write

mod common;

use common::TestRepo;
use propscan::schema::{ComponentType, ExtractionMethod};

const BUTTON_TSX: &str = r#"import React from 'react';

interface ButtonProps {
  /** Visible label */
  label: string;
  disabled?: boolean;
}

/**
 * A clickable button control.
 */
export function Button({ label, disabled }: ButtonProps) {
  return <button disabled={disabled}>{label}</button>;
}
"#;

const MATH_TS: &str = "export const add = (a: number, b: number) => a + b;\n";

const CARD_INDEX_TSX: &str = r#"import React from 'react';

/**
 * A content card with an optional footer.
 */
export function Card({ children }) {
  return <div className="card">{children}</div>;
}
"#;

const USE_TOGGLE_TS: &str = r#"import { useState, useCallback } from 'react';

/**
 * Toggle a boolean flag with a stable callback.
 */
export function useToggle(initial: boolean = false) {
  const [on, setOn] = useState(initial);
  const toggle = useCallback(() => setOn(v => !v), []);
  return [on, toggle];
}
"#;

#[test]
fn scan_writes_document_store_with_extracted_props() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);
    repo.add_file("src/utils/math.ts", MATH_TS);

    let outcome = repo.scan();
    assert!(!outcome.skipped_existing);
    assert!(outcome.output.exists());

    let store = repo.read_store();
    assert_eq!(store.summary.files_scanned, 2);
    assert_eq!(store.summary.files_skipped, 1);
    assert_eq!(store.summary.files_failed, 0);
    assert_eq!(store.components.len(), 1);

    let button = &store.components[0];
    assert_eq!(button.name, "Button");
    assert_eq!(button.file, "src/components/Button.tsx");
    assert_eq!(button.directory, "src/components");
    assert!(!button.description.is_empty());
    assert!(!button.raw_excerpt.is_empty());

    let label = button.props.get("label").expect("label prop missing");
    assert!(label.required);
    let disabled = button.props.get("disabled").expect("disabled prop missing");
    assert!(!disabled.required);
}

#[test]
fn existing_store_short_circuits_unless_forced() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);

    let first = repo.scan();
    assert!(!first.skipped_existing);

    let second = repo.scan();
    assert!(second.skipped_existing);
    assert!(second.store.is_none());

    let forced = repo.scan_with(|opts| opts.force = true);
    assert!(!forced.skipped_existing);
    assert!(forced.store.is_some());
}

#[test]
fn rejected_files_produce_no_records() {
    let repo = TestRepo::new();
    repo.add_file("src/constants.ts", "export const x = 5;\n");
    repo.add_file("src/utils/format.ts", MATH_TS);

    let store = {
        repo.scan();
        repo.read_store()
    };

    assert!(store.components.is_empty());
    assert_eq!(store.summary.files_scanned, 2);
    assert_eq!(store.summary.files_skipped, 2);
    assert_eq!(store.summary.components_found, 0);
}

#[test]
fn ignored_directories_are_not_traversed() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);
    repo.add_file("node_modules/lib/Button.tsx", BUTTON_TSX);
    repo.add_file("dist/Button.tsx", BUTTON_TSX);
    repo.add_file("src/components/__tests__/Button.tsx", BUTTON_TSX);

    repo.scan();
    let store = repo.read_store();

    assert_eq!(store.summary.files_scanned, 1);
    assert_eq!(store.components.len(), 1);
    assert_eq!(store.components[0].file, "src/components/Button.tsx");
}

#[test]
fn index_file_takes_directory_name() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Card/index.tsx", CARD_INDEX_TSX);

    repo.scan();
    let store = repo.read_store();

    assert_eq!(store.components.len(), 1);
    assert_eq!(store.components[0].name, "Card");
}

#[test]
fn hook_is_recorded_with_hook_type() {
    let repo = TestRepo::new();
    repo.add_file("src/hooks/useToggle.ts", USE_TOGGLE_TS);

    repo.scan();
    let store = repo.read_store();

    assert_eq!(store.components.len(), 1);
    let hook = &store.components[0];
    assert_eq!(hook.name, "useToggle");
    assert_eq!(hook.component_type, ComponentType::Hook);
}

#[test]
fn records_are_sorted_case_insensitively() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Banner.tsx", &BUTTON_TSX.replace("Button", "Banner"));
    repo.add_file("src/components/Alert.tsx", &BUTTON_TSX.replace("Button", "Alert"));
    repo.add_file("src/hooks/useToggle.ts", USE_TOGGLE_TS);

    repo.scan();
    let store = repo.read_store();

    let names: Vec<&str> = store.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alert", "Banner", "useToggle"]);
}

#[test]
fn summary_breakdowns_cover_every_record() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);
    repo.add_file("src/components/Card/index.tsx", CARD_INDEX_TSX);
    repo.add_file("src/hooks/useToggle.ts", USE_TOGGLE_TS);

    repo.scan();
    let store = repo.read_store();

    let total = store.components.len();
    assert_eq!(store.summary.components_found, total);
    assert_eq!(store.summary.by_method.values().sum::<usize>(), total);
    assert_eq!(store.summary.by_type.values().sum::<usize>(), total);
    assert_eq!(store.summary.by_directory.values().sum::<usize>(), total);

    // Every method key must be a known serialized variant
    for key in store.summary.by_method.keys() {
        assert!(
            key == ExtractionMethod::Automatic.as_str() || key == ExtractionMethod::Manual.as_str(),
            "unexpected method key {}",
            key
        );
    }
}

#[test]
fn root_level_component_is_not_counted_as_a_directory() {
    let repo = TestRepo::new();
    repo.add_file("App.tsx", &BUTTON_TSX.replace("Button", "App"));

    repo.scan();
    let store = repo.read_store();

    assert_eq!(store.components.len(), 1);
    assert_eq!(store.components[0].directory, "");
    assert!(store.summary.by_directory.is_empty());
}

#[test]
fn scan_of_missing_root_fails() {
    let repo = TestRepo::new();
    let missing = repo.path().join("does-not-exist");

    let options = propscan::scan::ScanOptions::new(missing);
    let result = propscan::scan::run(&options, &propscan::extract::TreeSitterParser);
    assert!(result.is_err());
}

#[test]
fn test_and_story_files_are_skipped_during_traversal() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);
    repo.add_file("src/components/Button.test.tsx", BUTTON_TSX);
    repo.add_file("src/components/Button.stories.tsx", BUTTON_TSX);

    repo.scan();
    let store = repo.read_store();

    assert_eq!(store.summary.files_scanned, 1);
    assert_eq!(store.components.len(), 1);
}

#[test]
fn rescans_of_an_unchanged_tree_are_identical_modulo_timestamp() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Button.tsx", BUTTON_TSX);
    repo.add_file("src/components/Card/index.tsx", CARD_INDEX_TSX);
    repo.add_file("src/hooks/useToggle.ts", USE_TOGGLE_TS);

    repo.scan();
    let first = repo.read_store();

    let second = repo
        .scan_with(|opts| opts.force = true)
        .store
        .expect("forced rescan produced no store");

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.components, second.components);
    assert_eq!(first.version, second.version);
}

#[test]
fn max_files_caps_the_candidate_list() {
    let repo = TestRepo::new();
    repo.add_file("src/components/Alert.tsx", &BUTTON_TSX.replace("Button", "Alert"));
    repo.add_file("src/components/Banner.tsx", &BUTTON_TSX.replace("Button", "Banner"));
    repo.add_file("src/components/Chip.tsx", &BUTTON_TSX.replace("Button", "Chip"));

    repo.scan_with(|opts| opts.max_files = Some(1));
    let store = repo.read_store();

    assert_eq!(store.summary.files_scanned, 1);
}
