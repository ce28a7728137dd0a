use claims::assert_matches;
use person_audio_sampler::{Error, audio::Waveform, domain::PersonName};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, query_param},
};

use crate::helpers::{FakeFetcher, TestApp, entries, search_response};

#[tokio::test]
async fn sampling_a_person_writes_a_fifteen_second_clip() {
    let app = TestApp::spawn_app(FakeFetcher::millisecond_ramp(60_000)).await;
    Mock::given(query_param("q", "Barack Obama voice sample"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&["obama123"])))
        .expect(1)
        .mount(&app.search_server)
        .await;
    let person = PersonName::parse("Barack Obama").unwrap();

    let sample = app
        .sampler
        .sample_person(&person, app.output_dir.path())
        .await
        .expect("Sampling failed.");

    assert_eq!(
        sample.video_url.as_str(),
        "https://www.youtube.com/watch?v=obama123"
    );
    assert_eq!(sample.path, app.output_dir.path().join("Barack_Obama_voice.wav"));
    assert_eq!(Waveform::open(&sample.path).unwrap().duration_ms(), 15_000);

    let calls = app.fetcher.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url, sample.video_url.as_str());
    assert!(entries(app.scratch_dir.path()).is_empty());
}

#[tokio::test]
async fn download_uses_the_configured_segment_length() {
    let app = TestApp::spawn_app(FakeFetcher::millisecond_ramp(40_000)).await;
    app.mount_search_results(&["abc"]).await;
    let person = PersonName::parse("Ada Lovelace").unwrap();

    let url = app.sampler.get_person_video_url(&person).await.unwrap();
    let output_path = app.output_dir.path().join("ada.wav");
    let path = app
        .sampler
        .download_audio_segment(&url, &output_path)
        .await
        .unwrap();

    assert_eq!(path, output_path);
    assert_eq!(app.sampler.segment_length().seconds(), 15);
    assert_eq!(Waveform::open(&path).unwrap().duration_ms(), 15_000);
}

#[tokio::test]
async fn no_search_results_stop_before_downloading() {
    let app = TestApp::spawn_app(FakeFetcher::millisecond_ramp(60_000)).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response(&[])))
        .expect(1)
        .mount(&app.search_server)
        .await;
    let person = PersonName::parse("Nobody Known").unwrap();

    let result = app.sampler.sample_person(&person, app.output_dir.path()).await;

    assert_matches!(result, Err(Error::NotFound { .. }));
    assert!(app.fetcher.calls().is_empty());
    assert!(entries(app.output_dir.path()).is_empty());
}

#[tokio::test]
async fn short_videos_leave_no_output() {
    let app = TestApp::spawn_app(FakeFetcher::millisecond_ramp(5_000)).await;
    app.mount_search_results(&["short"]).await;
    let person = PersonName::parse("Barack Obama").unwrap();

    let result = app.sampler.sample_person(&person, app.output_dir.path()).await;

    assert_matches!(result, Err(Error::InvalidDuration { .. }));
    assert!(entries(app.output_dir.path()).is_empty());
    assert!(entries(app.scratch_dir.path()).is_empty());
}
