//! End-to-end screening scenarios
//!
//! Registry JSON and portfolio CSV go through the same decoding the
//! command line uses, then through the full screening run.

use asset_freeze_screening::{
    export, load_portfolio, load_portfolio_path, Error, Nature, PortfolioEntry, RegistryField,
    RegistryId, RegistryRecord, RegistrySnapshot, RejectedEntry, ScoreBreakdown, Screener,
    ScreeningOutcome, ScreeningRequest, DEFAULT_THRESHOLD,
};
use asset_freeze_screening::types::{FieldValue, ALIAS_FIELD, GIVEN_NAME_FIELD};

const REGISTRY: &str = r#"{
    "Publications": {
        "DatePublication": "2024-11-05T08:00:00",
        "PublicationDetail": [
            {
                "IdRegistre": 4321,
                "Nature": "Personne physique",
                "Nom": "Dupont",
                "RegistreDetail": [
                    { "TypeChamp": "PRENOM", "Valeur": [ { "Prenom": "Jean" } ] },
                    { "TypeChamp": "ALIAS", "Valeur": [ { "Alias": "Dupont" } ] }
                ]
            },
            {
                "IdRegistre": 9876,
                "Nature": "Personne physique",
                "Nom": "BEN ALI",
                "RegistreDetail": [
                    { "TypeChamp": "ALIAS", "Valeur": [ { "Alias": "Ahmed Ben Ali" } ] }
                ]
            },
            {
                "IdRegistre": 555,
                "Nature": "Personne morale",
                "Nom": "Claire Martin",
                "RegistreDetail": [
                    { "TypeChamp": "PRENOM", "Valeur": [ { "Prenom": "Claire" } ] },
                    { "TypeChamp": "ALIAS", "Valeur": [ { "Alias": "Claire Martin" } ] }
                ]
            }
        ]
    }
}"#;

const PORTFOLIO: &str = "contractId;nom;prenom\nC1;Dupont;Jean\nC2;Ali;Mohamed\nC3;Martin;Claire\n";

fn person(id: &str, surname: &str, given: &str) -> RegistryRecord {
    RegistryRecord {
        id: RegistryId::new(id),
        nature: Nature::NaturalPerson,
        primary_name: surname.to_string(),
        fields: vec![RegistryField::new(
            GIVEN_NAME_FIELD,
            vec![FieldValue::GivenName { first_name: given.to_string() }],
        )],
    }
}

fn screen_sample() -> asset_freeze_screening::ScreeningReport {
    let registry = RegistrySnapshot::from_json_str(REGISTRY).unwrap();
    let portfolio = load_portfolio(PORTFOLIO.as_bytes(), b';').unwrap();
    Screener::default()
        .screen(&ScreeningRequest::new(registry.records, portfolio))
        .unwrap()
}

#[test]
fn test_exact_name_is_a_concern() {
    let report = screen_sample();

    let first = &report.results()[0];
    assert_eq!(first.portfolio_entry.contract_id, "C1");
    assert_eq!(first.best_candidate.name, "jean dupont");
    assert_eq!(first.best_candidate.registry_id.as_str(), "4321");
    assert!((first.score - 100.0).abs() < 1e-9);

    assert_eq!(report.outcome(), ScreeningOutcome::ConcernsFound(1));
    assert_eq!(report.concern().len(), 1);
}

#[test]
fn test_extremes_variant_drives_partial_match() {
    let report = screen_sample();
    let c2 = report
        .results()
        .iter()
        .find(|r| r.portfolio_entry.contract_id == "C2")
        .unwrap();

    assert_eq!(c2.best_candidate.name, "ahmed ben ali");
    assert!(c2.score < 100.0);
    assert!(c2.score <= DEFAULT_THRESHOLD);

    let breakdown = ScoreBreakdown::compute("mohamed ali", "ahmed ben ali");
    assert!(breakdown.extremes >= breakdown.full);
    assert!((c2.score - breakdown.extremes).abs() < 1e-9);
}

#[test]
fn test_legal_entity_contributes_no_candidates() {
    let report = screen_sample();
    let c3 = report
        .results()
        .iter()
        .find(|r| r.portfolio_entry.contract_id == "C3")
        .unwrap();

    // The only exact "claire martin" is a legal entity
    assert_ne!(c3.best_candidate.registry_id.as_str(), "555");
    assert!(c3.score < 100.0);

    let entity_only = RegistrySnapshot::from_json_str(REGISTRY)
        .unwrap()
        .records
        .into_iter()
        .filter(|r| r.nature == Nature::LegalEntity)
        .collect::<Vec<_>>();
    let request = ScreeningRequest::new(entity_only, vec![PortfolioEntry::new("C3", "Claire", "Martin")]);
    assert!(matches!(
        Screener::default().screen(&request),
        Err(Error::NoCandidatesAvailable)
    ));
}

#[test]
fn test_empty_index_cannot_screen() {
    let request = ScreeningRequest::new(Vec::new(), vec![PortfolioEntry::new("C1", "Jean", "Dupont")]);

    let err = Screener::default().screen(&request).unwrap_err();
    assert!(matches!(err, Error::NoCandidatesAvailable));
}

#[test]
fn test_single_token_alias_is_not_indexed() {
    let mut record = person("1", "Smith", "John");
    record.fields = vec![RegistryField::new(
        ALIAS_FIELD,
        vec![FieldValue::Alias { alias: "Smith".to_string() }],
    )];
    let request = ScreeningRequest::new(vec![record], vec![PortfolioEntry::new("C1", "John", "Smith")]);
    assert!(matches!(
        Screener::default().screen(&request),
        Err(Error::NoCandidatesAvailable)
    ));
}

#[test]
fn test_tied_candidates_keep_registry_order() {
    let registry = vec![
        person("FIRST", "Dupont", "Jean"),
        person("SECOND", "DUPONT", "JEAN"),
    ];
    let request = ScreeningRequest::new(registry, vec![PortfolioEntry::new("C1", "Jean", "Dupont")]);

    let report = Screener::default().screen(&request).unwrap();
    assert_eq!(report.results()[0].best_candidate.registry_id.as_str(), "FIRST");
}

#[test]
fn test_clean_run_is_distinct_outcome() {
    let request = ScreeningRequest::new(
        vec![person("1", "Dupont", "Jean")],
        vec![PortfolioEntry::new("C7", "Zoé", "Lambert")],
    );

    let report = Screener::default().screen(&request).unwrap();
    assert_eq!(report.results().len(), 1);
    assert_eq!(report.outcome(), ScreeningOutcome::Clean);
}

#[test]
fn test_threshold_changes_classification() {
    let registry = RegistrySnapshot::from_json_str(REGISTRY).unwrap();
    let portfolio = load_portfolio(PORTFOLIO.as_bytes(), b';').unwrap();

    let request = ScreeningRequest::new(registry.records, portfolio).with_threshold(50.0);
    let report = Screener::default().screen(&request).unwrap();

    assert!(report.concern().len() >= 2);
    assert!(report.concern().iter().all(|r| r.score > 50.0));
    assert!(report.no_concern().iter().all(|r| r.score <= 50.0));
}

#[test]
fn test_files_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let registry_path = dir.path().join("registry.json");
    let portfolio_path = dir.path().join("portfolio.csv");
    let report_path = dir.path().join("report.csv");
    std::fs::write(&registry_path, REGISTRY).unwrap();
    std::fs::write(&portfolio_path, PORTFOLIO).unwrap();

    let registry = RegistrySnapshot::from_path(&registry_path).unwrap();
    let portfolio = load_portfolio_path(&portfolio_path, b';').unwrap();
    let report = Screener::default()
        .screen(&ScreeningRequest::new(registry.records, portfolio))
        .unwrap();
    export::write_report_path(&report_path, &report).unwrap();

    let written = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "assure;contractId;bestMatch;idRegistre;score");
    assert_eq!(lines[1], "Jean Dupont;C1;jean dupont;4321;100");
}

#[test]
fn test_truncated_portfolio_row_is_rejected_alone() {
    let registry = RegistrySnapshot::from_json_str(REGISTRY).unwrap();
    let portfolio = load_portfolio(
        "contractId;nom;prenom\nC1;Dupont;Jean\nC2;Martin\nC3;Durand;Paul\n".as_bytes(),
        b';',
    )
    .unwrap();

    let report = Screener::default()
        .screen(&ScreeningRequest::new(registry.records, portfolio))
        .unwrap();

    assert_eq!(report.results().len(), 2);
    assert_eq!(
        report.rejected,
        vec![RejectedEntry {
            row: 1,
            contract_id: "C2".to_string(),
            missing_field: "prenom".to_string(),
        }]
    );
    assert_eq!(report.concern()[0].portfolio_entry.contract_id, "C1");
}
