use haar_vote_face::{CorpusSource, DetectorConfig, Trainer};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    // faces/face1.jpg .. faces/face57.jpg, all 225x225
    let trainer = Trainer::new(DetectorConfig::default())?;
    let outcome = trainer.train(&CorpusSource::faces("faces", 57))?;

    println!("{}", outcome.report());
    Ok(())
}
