use cabin_scene::{config::SceneConfig, flow};

fn main() -> anyhow::Result<()> {
    let config = SceneConfig::from_env()?;
    flow::run(config)
}
