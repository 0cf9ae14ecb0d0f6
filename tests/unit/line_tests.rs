/*!
 * Tests for line timing, intersection and formatting
 */

use serde_json::json;
use subline::{
    Extent, FormatOptions, LineSet, Section, SectionSpec, Spanned, Subtitle, SubtitleError,
};

const TEXT: &str = "Test line\ntesting lines";

fn create_subtitle() -> (Subtitle, subline::NodeId) {
    let mut subtitle = Subtitle::new();
    let id = subtitle.add(1000..1950, TEXT);
    (subtitle, id)
}

/// Test visibility predicates at the boundaries of a line
#[test]
fn test_line_predicates_withBoundaryTimes_shouldMatchInclusively() {
    let (subtitle, id) = create_subtitle();
    let line = subtitle.line(id).unwrap();

    assert!(line.is_during(1000));
    assert!(line.is_during(1950));
    assert!(!line.is_during(999));
    assert!(!line.is_during(1951));

    assert!(line.is_before(1950));
    assert!(!line.is_before(1949));
    assert!(line.is_after(1000));
    assert!(!line.is_after(1001));

    assert_eq!(line.duration(), 950);
}

/// Test intersections through the chain with dynamic operands
#[test]
fn test_line_intersect_withExtents_shouldMeasureOverlap() {
    let (mut subtitle, id) = create_subtitle();
    let other = subtitle.add(1900..2500, "Overlapping");
    let chain = subtitle.chain();

    assert_eq!(chain.intersect(id, id).unwrap(), 950);
    assert_eq!(chain.intersect(id, other).unwrap(), 50);
    assert_eq!(chain.intersect(other, id).unwrap(), 50);
    assert_eq!(chain.intersect(id, Extent::from(999_i64..1000)).unwrap(), 0);
    assert_eq!(chain.intersect(id, Extent::from(1950_i64..1951)).unwrap(), 0);
}

/// Test that something without a beginning and an end is rejected
#[test]
fn test_line_intersect_withInstant_shouldBeTypeMismatch() {
    let (subtitle, id) = create_subtitle();

    let result = subtitle.chain().intersect(id, 5_i64);

    assert!(matches!(result, Err(SubtitleError::TypeMismatch(_))));
}

/// Test formatting sections addressed through JSON values
#[test]
fn test_line_format_withJsonSections_shouldResolveEachShape() {
    let (mut subtitle, id) = create_subtitle();
    let line = subtitle.line_mut(id).unwrap();

    let whole = SectionSpec::try_from(&json!(null)).unwrap();
    let second = SectionSpec::try_from(&json!(1)).unwrap();
    let range = SectionSpec::try_from(&json!([0, 4])).unwrap();

    assert_eq!(line.format(whole, &FormatOptions::new()).unwrap().section(), Section::new(0, 23));
    assert_eq!(line.format(second, &FormatOptions::new()).unwrap().section(), Section::new(10, 23));
    assert_eq!(line.format(range, &FormatOptions::new()).unwrap().section(), Section::new(0, 4));
    assert_eq!(line.formatting().len(), 3);
}

/// Test that equal sections share one record and accumulate styles
#[test]
fn test_line_format_withRepeatedSection_shouldAccumulateOnSameRecord() {
    let (mut subtitle, id) = create_subtitle();
    let line = subtitle.line_mut(id).unwrap();

    line.format(SectionSpec::Paragraph(0), &FormatOptions::new().bold(true)).unwrap();
    line.format(SectionSpec::Range(0..9), &FormatOptions::new().color("red")).unwrap();
    assert_eq!(line.formatting().len(), 1);

    line.format(SectionSpec::Paragraph(1), &FormatOptions::new().italic(true)).unwrap();
    assert_eq!(line.formatting().len(), 2);

    let formatting = line.formatting_at(Section::new(0, 9)).unwrap();
    assert!(formatting.is_bold());
    assert!(!formatting.is_italic());
    assert_eq!(formatting.color(), Some("red"));

    let other = line.formatting_at(Section::new(10, 23)).unwrap();
    assert!(other.is_italic());
    assert_eq!(other.color(), None);
}

/// Test right-biased merging across calls
#[test]
fn test_line_format_withConflictingOptions_shouldKeepLatest() {
    let (mut subtitle, id) = create_subtitle();
    let line = subtitle.line_mut(id).unwrap();

    line.format(SectionSpec::Whole, &FormatOptions::new().bold(true).italic(true)).unwrap();
    let formatting = line.format(SectionSpec::Whole, &FormatOptions::new().bold(false).underline(true)).unwrap();

    assert!(!formatting.is_bold());
    assert!(formatting.is_italic());
    assert!(formatting.is_underline());
}

/// Test section errors
#[test]
fn test_line_format_withInvalidSections_shouldFail() {
    let (mut subtitle, id) = create_subtitle();
    let line = subtitle.line_mut(id).unwrap();

    assert!(matches!(line.format(SectionSpec::Paragraph(2), &FormatOptions::new()), Err(SubtitleError::RangeError(_))));
    assert!(matches!(line.format(SectionSpec::Range(20..24), &FormatOptions::new()), Err(SubtitleError::RangeError(_))));
    assert!(matches!(SectionSpec::try_from(&json!("first")), Err(SubtitleError::TypeMismatch(_))));
    assert!(line.formatting().is_empty());
}

/// Test that the empty text still has a whole-line section
#[test]
fn test_line_format_withEmptyText_shouldUseEmptySection() {
    let mut subtitle = Subtitle::new();
    let id = subtitle.add(0..1, "");
    let line = subtitle.line_mut(id).unwrap();

    let formatting = line.format(SectionSpec::Whole, &FormatOptions::new().bold(true)).unwrap();

    assert_eq!(formatting.section(), Section::new(0, 0));
    assert!(formatting.section().is_empty());
}
