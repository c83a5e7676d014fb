//! End-to-end wizard flow: setup form, remote generation through the HTTP
//! service, keyword research, campaign structure.

use sem_api::rest::AppState;
use sem_planner::PlanGenerator;
use sem_wizard::{
    RecordingNotifier, RemotePlanSource, SetupForm, Wizard, WizardStep,
};

/// Construct a filled-in setup form for testing.
fn sample_form() -> SetupForm {
    SetupForm {
        brand_website: "https://www.brand.example".to_string(),
        competitor_website: "https://www.rival.example".to_string(),
        target_locations: "Mumbai, Delhi".to_string(),
        ..Default::default()
    }
}

async fn spawn_service() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = sem_api::router(AppState::new(PlanGenerator::default(), "flow-test"));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[test]
fn test_form_wire_body() {
    let json = serde_json::to_value(sample_form().to_wire()).unwrap();
    assert_eq!(json["brand_website"], "https://www.brand.example");
    assert_eq!(json["target_locations"], "Mumbai, Delhi");
    assert_eq!(json["themes"][1], "fitness supplements");
    assert_eq!(json["budget_allocations"]["cap"], 1000.0);
    assert_eq!(json["budget_allocations"]["pmax"], 1500.0);
}

#[tokio::test]
async fn test_remote_wizard_flow() {
    let base = spawn_service().await;
    let source = RemotePlanSource::new(&base);
    let notifier = RecordingNotifier::new();
    let mut wizard = Wizard::new();

    let plan = wizard.submit(&sample_form(), &source, &notifier).await.unwrap();
    assert_eq!(plan.summary.total_keywords, 19);
    let location = plan.ad_group("Location-based Queries").unwrap();
    let texts: Vec<_> = location.keywords.iter().map(|k| k.text.as_str()).collect();
    assert_eq!(texts, vec!["protein powder mumbai", "protein powder delhi"]);

    assert_eq!(wizard.step(), WizardStep::KeywordResearch);
    assert_eq!(
        notifier.last().unwrap().description,
        "Successfully generated SEM plan and recommendations"
    );

    wizard.proceed().unwrap();
    assert_eq!(wizard.step(), WizardStep::CampaignStructure);

    let copied = wizard
        .copy_ad_group("Location-based Queries", &notifier)
        .unwrap();
    assert_eq!(copied, "protein powder mumbai\nprotein powder delhi");
}

#[tokio::test]
async fn test_remote_failure_keeps_setup() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = RemotePlanSource::new(&format!("http://{addr}"));
    let notifier = RecordingNotifier::new();
    let mut wizard = Wizard::new();

    assert!(wizard.submit(&sample_form(), &source, &notifier).await.is_err());
    assert_eq!(wizard.step(), WizardStep::Setup);
    assert!(notifier.last().unwrap().is_error());

    // Retry against a live service succeeds.
    let live = RemotePlanSource::new(&spawn_service().await);
    let plan = wizard.submit(&sample_form(), &live, &notifier).await.unwrap();
    assert_eq!(plan.budgets.total(), 4500.0);
    assert!(live.endpoint().ends_with("/generate_sem_plan/"));
}
