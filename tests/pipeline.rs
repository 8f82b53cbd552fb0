use anyhow::Result;
use partnerpulse::{
    fetch::{load, load_or_fallback, urls::Sheet, DataSource, DirSource},
    report::{period_report, unsigned_partners},
    schema::{Channel, ContractStatus, Fallback},
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,partnerpulse=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_fixture_workbook_end_to_end() -> Result<()> {
    init_test_logging();
    let d = load(&DirSource::new(fixtures())).await?;
    let snap = &d.snapshot;

    assert_eq!(snap.current_month_idx, 1);
    assert_eq!(snap.total_closed_mrr[0], 860.0);
    assert_eq!(snap.total_closed_mrr[1], 1200.0);
    assert_eq!(snap.total_closed_mrr[2], 0.0);
    assert_eq!(snap.total_closed_arr[0], 10320.0);
    assert!(close(snap.total_target_mrr[11], 2385.34));
    assert!(close(snap.company_growth_mrr[1], 6722.42));
    assert!(close(snap.company_growth_pct[0], 0.044));

    assert_eq!(snap.channels.referrals.closed_mrr, [0.0; 12]);
    assert!(close(snap.channels.referrals.target_mrr[0], 181.56));
    assert_eq!(snap.channels.resellers.closed_arr[1], 14400.0);
    assert_eq!(snap.channels.resellers.closed_mrr[1], 1200.0);
    assert_eq!(snap.channels.agencies.closed_mrr[0], 600.0);
    assert_eq!(snap.channels.agencies.closed_arr, [0.0; 12]);
    assert!(close(snap.channels.agencies.target_mrr[0], 60.52));

    assert!(close(snap.allocation.referrals, 0.3));
    assert!(close(snap.allocation.resellers, 0.6));
    assert!(close(snap.allocation.agencies, 0.1));
    assert!(close(snap.annual_target.referrals, 7263.5));
    assert!(close(snap.annual_target.resellers, 14527.0));
    assert!(close(snap.annual_target.agencies, 2421.17));
    Ok(())
}

#[tokio::test]
async fn test_fixture_partners() -> Result<()> {
    init_test_logging();
    let d = load(&DirSource::new(fixtures())).await?;

    let refs = &d.partners.referrals;
    let names: Vec<_> = refs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Orjuela, Juan", "Vega, Hensey\n(Lebrand)", "Molzait", "Tenzo"]
    );
    assert_eq!(refs[0].arr, 47265.0);
    assert_eq!(refs[0].start, "2024-02");
    assert_eq!(refs[2].contact_person, "Said \"Mo\" K.");
    assert_eq!(
        refs[2].commission,
        "10% direct on first-year licence revenue, then 5% recurring ..."
    );
    assert_eq!(refs[3].contract, ContractStatus::Unsigned);
    assert_eq!(refs[3].start, "-");
    assert_eq!(refs[3].arr, 0.0);
    assert!(refs[..3].iter().all(|p| p.contract == ContractStatus::Signed));

    assert_eq!(d.partners.resellers[0].name, "Biermann, Benjamin");
    assert_eq!(d.partners.resellers[0].mrr2026[0], 260.0);

    let agencies = &d.partners.agencies;
    assert_eq!(agencies.len(), 3);
    assert_eq!(agencies[2].name, "Findri");
    assert_eq!(agencies[2].contract, ContractStatus::Unsigned);
    assert_eq!(agencies[0].commission, "€100/location");

    for (_, p) in d.partners.all() {
        assert_eq!(p.mrr2026.len(), 12);
    }

    let unsigned: Vec<_> = unsigned_partners(&d.partners)
        .into_iter()
        .map(|(c, p)| (c, p.name.clone()))
        .collect();
    assert_eq!(
        unsigned,
        vec![
            (Channel::Referrals, "Tenzo".to_string()),
            (Channel::Agencies, "Findri".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_fixture_period_report() -> Result<()> {
    let d = load(&DirSource::new(fixtures())).await?;
    let r = period_report(&d, 0, d.snapshot.current_month_idx);
    assert_eq!(r.label, "YTD");
    assert_eq!(r.closed_mrr, 2060.0);
    assert_eq!(r.unsigned_partners, 2);
    assert_eq!(r.channels.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_sheet_falls_back_wholesale() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    for sheet in [Sheet::Performance, Sheet::Referrals, Sheet::Resellers] {
        let name = format!("{}.csv", sheet);
        std::fs::copy(fixtures().join(&name), tmp.path().join(&name))?;
    }

    let outcome = load_or_fallback(&DirSource::new(tmp.path()), &Fallback::Empty).await;
    assert_eq!(outcome.source, DataSource::Fallback);
    // nothing from the three readable sheets leaks into the result
    assert_eq!(outcome.dataset.snapshot.total_closed_mrr, [0.0; 12]);
    assert!(outcome.dataset.partners.referrals.is_empty());
    assert!(outcome.error.unwrap_or_default().contains("agencies"));
    Ok(())
}
