//! Property-based tests for the template language

use poshterm::prompt::template::{render, TemplateData};
use poshterm::template_data;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_render_doesnt_panic(source in "\\PC*", value in "\\PC{0,20}") {
        let data = template_data! { "Field" => value };
        let _ = render(&source, &data);
    }

    #[test]
    fn test_brace_heavy_templates_dont_panic(source in "[{}. a-zA-Z]{0,100}") {
        let _ = render(&source, &TemplateData::new());
    }

    #[test]
    fn test_text_without_tags_is_trimmed_copy(source in "[a-zA-Z0-9 ]{0,100}") {
        prop_assert_eq!(render(&source, &TemplateData::new()), source.trim());
    }

    #[test]
    fn test_field_substitution(name in "[A-Za-z][A-Za-z0-9_]{0,10}", value in "[a-z0-9]{0,20}") {
        let data = template_data! { name.as_str() => value.as_str() };
        let source = format!("{{{{ .{} }}}}", name);
        prop_assert_eq!(render(&source, &data), value);
    }

    #[test]
    fn test_missing_fields_render_empty(name in "[A-Za-z][A-Za-z0-9_]{0,10}") {
        let source = format!("<{{{{ .{} }}}}>", name);
        prop_assert_eq!(render(&source, &TemplateData::new()), "<>");
    }

    #[test]
    fn test_conditional_picks_one_branch(flag in any::<bool>(), code in any::<i32>()) {
        let data = template_data! { "Flag" => flag, "Code" => code };
        prop_assert_eq!(
            render("{{ if .Flag }}yes{{ else }}no{{ end }}", &data),
            if flag { "yes" } else { "no" }
        );
        prop_assert_eq!(
            render("{{ if .Code }}err{{ else }}ok{{ end }}", &data),
            if code != 0 { "err" } else { "ok" }
        );
    }
}
