use bluprint_core::{BuildEvaluator, CompatibilityRule, Part};
use proptest::prelude::*;

fn pair_rules() -> Vec<CompatibilityRule> {
    vec![
        CompatibilityRule::new(1, "CPU", "Motherboard", "socket_match"),
        CompatibilityRule::new(2, "Case", "Motherboard", "form_factor"),
        CompatibilityRule::new(3, "Storage", "Motherboard", "interface_match")
            .with_param("required_interface", "NVMe"),
        CompatibilityRule::new(4, "PSU", "PSU", "power_requirement"),
    ]
}

#[test]
fn test_same_id_is_trivially_compatible() {
    let cpu = Part::new(1, "Ryzen 5 5600X", "CPU").with_spec("socket", "AM4");
    let verdict = BuildEvaluator::default().evaluate_pair(&cpu, &cpu, &pair_rules());
    assert!(verdict.is_compatible);
    assert!(verdict.reason.is_none());
}

#[test]
fn test_pair_is_oriented_to_rule_categories() {
    let cpu = Part::new(1, "Core i5-12600K", "CPU").with_spec("socket", "LGA1700");
    let board = Part::new(2, "B550 Tomahawk", "Motherboard").with_spec("socket", "AM4");
    let evaluator = BuildEvaluator::default();

    let forward = evaluator.evaluate_pair(&cpu, &board, &pair_rules());
    let backward = evaluator.evaluate_pair(&board, &cpu, &pair_rules());
    assert!(!forward.is_compatible);
    assert_eq!(forward, backward);
    assert_eq!(
        forward.reason.as_deref(),
        Some("Core i5-12600K (socket: LGA1700) is incompatible with B550 Tomahawk (socket: AM4)")
    );
}

#[test]
fn test_unrelated_categories_pass() {
    let gpu = Part::new(1, "RTX 3070", "GPU");
    let psu = Part::new(2, "RM650", "PSU");
    let verdict = BuildEvaluator::default().evaluate_pair(&gpu, &psu, &pair_rules());
    assert!(verdict.is_compatible);
}

#[test]
fn test_aggregate_rules_ignored_for_pairs() {
    let a = Part::new(1, "RM650", "PSU");
    let b = Part::new(2, "SFX450", "PSU");
    let verdict = BuildEvaluator::default().evaluate_pair(&a, &b, &pair_rules());
    assert!(verdict.is_compatible);
}

#[test]
fn test_pair_collects_warnings() {
    let case = Part::new(1, "Obsidian", "Case").with_spec("form_factor", "Mini-Tower");
    let board = Part::new(2, "B550 Tomahawk", "Motherboard").with_spec("form_factor", "ATX");
    let verdict = BuildEvaluator::default().evaluate_pair(&board, &case, &pair_rules());
    assert!(verdict.is_compatible);
    assert_eq!(verdict.warnings.len(), 1);
}

#[test]
fn test_first_failure_is_returned() {
    let rules = vec![
        CompatibilityRule::new(1, "Storage", "Motherboard", "interface_match")
            .with_param("required_interface", "SATA"),
        CompatibilityRule::new(2, "Storage", "Motherboard", "interface_match")
            .with_param("required_interface", "U.2"),
    ];
    let ssd = Part::new(1, "SN770", "Storage").with_spec("interface", "NVMe");
    let board = Part::new(2, "B550 Tomahawk", "Motherboard");
    let verdict = BuildEvaluator::default().evaluate_pair(&ssd, &board, &rules);
    assert_eq!(
        verdict.reason.as_deref(),
        Some("Interface mismatch: SATA required")
    );
}

#[test]
fn test_inactive_pair_rule_ignored() {
    let rules = vec![CompatibilityRule::new(1, "CPU", "Motherboard", "socket_match").inactive()];
    let cpu = Part::new(1, "A", "CPU").with_spec("socket", "AM5");
    let board = Part::new(2, "B", "Motherboard").with_spec("socket", "AM4");
    assert!(BuildEvaluator::default().evaluate_pair(&cpu, &board, &rules).is_compatible);
}

// ─────────────────────────────────────────────────────────────────────────────
// Symmetry
// ─────────────────────────────────────────────────────────────────────────────

fn optional_value(values: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(values).prop_map(str::to_string))
}

fn category() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&["CPU", "Motherboard", "Case", "Storage", "GPU"][..])
}

prop_compose! {
    fn arb_part(id: i64)(
        part_type in category(),
        socket in optional_value(&["AM4", "AM5", "LGA1700", " AM4 ", ""]),
        form_factor in optional_value(&["ATX", "mATX", "Micro ATX", "itx", "Mini-Tower", ""]),
        interface in optional_value(&["NVMe", "SATA", "nvme"]),
    ) -> Part {
        let mut part = Part::new(id, format!("part-{id}"), part_type);
        if let Some(socket) = socket {
            part = part.with_spec("socket", socket);
        }
        if let Some(form_factor) = form_factor {
            part = part.with_spec("form_factor", form_factor);
        }
        if let Some(interface) = interface {
            part = part.with_spec("interface", interface);
        }
        part
    }
}

proptest! {
    #[test]
    fn prop_pair_verdict_is_symmetric(a in arb_part(1), b in arb_part(2)) {
        let rules = pair_rules();
        let evaluator = BuildEvaluator::default();
        let forward = evaluator.evaluate_pair(&a, &b, &rules);
        let backward = evaluator.evaluate_pair(&b, &a, &rules);
        prop_assert_eq!(forward.is_compatible, backward.is_compatible);
    }

    #[test]
    fn prop_same_category_rules_are_symmetric(a in arb_part(1), b in arb_part(2)) {
        let rules = vec![
            CompatibilityRule::new(1, a.part_type.clone(), b.part_type.clone(), "socket_match"),
            CompatibilityRule::new(2, a.part_type.clone(), b.part_type.clone(), "form_factor"),
            CompatibilityRule::new(3, a.part_type.clone(), b.part_type.clone(), "interface_match")
                .with_param("required_interface", "SATA"),
        ];
        let evaluator = BuildEvaluator::default();
        prop_assert_eq!(
            evaluator.evaluate_pair(&a, &b, &rules).is_compatible,
            evaluator.evaluate_pair(&b, &a, &rules).is_compatible
        );
    }
}
