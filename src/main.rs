use person_audio_sampler::{
    Error, configuration::Settings, domain::PersonName, startup::PersonAudioSampler,
    telemetry::init_subscriber,
};
use std::{path::PathBuf, process::ExitCode};

const DEFAULT_PERSON: &str = "Barack Obama";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_subscriber();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let person = if args.is_empty() {
        PersonName::parse(DEFAULT_PERSON)?
    } else {
        PersonName::parse(args.join(" "))?
    };

    let configuration = Settings::new()?;
    let sampler = PersonAudioSampler::build(configuration)?;

    let url = sampler.get_person_video_url(&person).await?;
    println!("Video URL for {}: {}", person, url);

    let output_file = PathBuf::from(format!("{}.wav", person.voice_file_stem()));
    let audio_path = sampler.download_audio_segment(&url, &output_file).await?;
    println!("Audio segment saved to: {}", audio_path.display());

    Ok(())
}
