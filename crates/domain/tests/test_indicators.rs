use domain::indicators::{interpret, marker_percent, spec_by_id, Interpretation, ZoneColor, CATALOG};

#[test]
fn catalog_zones_are_ascending() {
    for spec in CATALOG {
        assert!(!spec.zones.is_empty(), "{} has no zones", spec.id);
        for pair in spec.zones.windows(2) {
            assert!(
                pair[0].to < pair[1].to,
                "{} zones out of order at {}",
                spec.id,
                pair[1].to
            );
        }
        assert!(spec.min < spec.max, "{} has an empty range", spec.id);
    }
}

#[test]
fn forward_scan_picks_first_zone_at_or_below_bound() {
    let glicemia = spec_by_id("glicemia").unwrap();

    let low = interpret(Some(50.0), glicemia.zones, glicemia.reversed);
    assert_eq!(low.tip(), "Hipoglicemia");

    let boundary = interpret(Some(99.0), glicemia.zones, glicemia.reversed);
    assert_eq!(boundary.status(), "Normal");

    let just_over = interpret(Some(99.5), glicemia.zones, glicemia.reversed);
    assert_eq!(just_over.tip(), "Pré-Diabetes");
}

#[test]
fn out_of_range_value_falls_into_last_zone() {
    let glicemia = spec_by_id("glicemia").unwrap();
    let way_over = interpret(Some(250.0), glicemia.zones, glicemia.reversed);
    assert_eq!(way_over.tip(), "Diabetes");
    assert_eq!(way_over.color(), ZoneColor::Red);
}

#[test]
fn reversed_scan_picks_highest_bound_reached() {
    let hdl = spec_by_id("hdl").unwrap();
    assert!(hdl.reversed);

    // Zone bounds 39/59/100: a value belongs to the highest zone whose
    // bound it reaches, so 70 has passed 59 but not 100 yet.
    assert_eq!(interpret(Some(100.0), hdl.zones, true).status(), "Ótimo");
    assert_eq!(interpret(Some(70.0), hdl.zones, true).status(), "Atenção");
    assert_eq!(interpret(Some(45.0), hdl.zones, true).tip(), "Baixo");
    assert_eq!(interpret(Some(39.0), hdl.zones, true).status(), "Alerta");
    // Below every bound: falls into the lowest zone.
    assert_eq!(interpret(Some(10.0), hdl.zones, true).status(), "Alerta");
}

#[test]
fn missing_or_non_finite_reading_is_not_available() {
    let glicemia = spec_by_id("glicemia").unwrap();
    assert_eq!(
        interpret(None, glicemia.zones, false),
        Interpretation::NotAvailable
    );
    assert_eq!(
        interpret(Some(f64::NAN), glicemia.zones, false),
        Interpretation::NotAvailable
    );
    assert_eq!(
        interpret(Some(f64::INFINITY), glicemia.zones, false),
        Interpretation::NotAvailable
    );
    assert_eq!(
        interpret(None, glicemia.zones, false).status(),
        "N/A"
    );
}

#[test]
fn marker_percent_is_clamped_to_range() {
    let glicemia = spec_by_id("glicemia").unwrap(); // 50..150

    assert_eq!(marker_percent(Some(100.0), glicemia), Some(50.0));
    assert_eq!(marker_percent(Some(0.0), glicemia), Some(0.0));
    assert_eq!(marker_percent(Some(500.0), glicemia), Some(100.0));
    assert_eq!(marker_percent(None, glicemia), None);
    assert_eq!(marker_percent(Some(f64::NAN), glicemia), None);
}

#[test]
fn lean_mass_zones_resolve_top_down() {
    let massa = spec_by_id("massamagra_bio").unwrap();
    assert!(massa.reversed);
    // Bounds 49/80/90: "Ótimo" only from 90 up, 85 sits in the 80
    // band and 60 has only cleared the 49 bound.
    assert_eq!(interpret(Some(90.0), massa.zones, true).status(), "Ótimo");
    assert_eq!(interpret(Some(85.0), massa.zones, true).status(), "Normal");
    assert_eq!(interpret(Some(60.0), massa.zones, true).status(), "Alerta");
    assert_eq!(interpret(Some(40.0), massa.zones, true).tip(), "Baixa");
}

#[test]
fn every_indicator_resolves_its_midpoint() {
    for spec in CATALOG {
        let mid = (spec.min + spec.max) / 2.0;
        let result = interpret(Some(mid), spec.zones, spec.reversed);
        assert_ne!(result, Interpretation::NotAvailable, "{}", spec.id);
    }
}
