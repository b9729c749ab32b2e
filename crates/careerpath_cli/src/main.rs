//! CLI probe for the career layout engine.
//!
//! # Responsibility
//! - Verify `careerpath_core` linkage with deterministic output.
//! - Dump the composed scene of a stored career record.

use careerpath_core::{
    CareerService, ContainerRect, LayoutConfig, NodeKey, Scene, SqliteStateRepository,
};
use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "careerpath", version, about = "Career timeline layout probe")]
struct Cli {
    /// SQLite file holding the career record.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Canvas width used for synthesis.
    #[arg(long, default_value_t = 1000.0)]
    width: f64,
    /// JSON layout configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        careerpath_core::init_logging(careerpath_core::default_log_level(), log_dir)?;
    }

    println!("careerpath_core ping={}", careerpath_core::ping());
    println!("careerpath_core version={}", careerpath_core::core_version());

    let Some(db_path) = cli.db else {
        return Ok(());
    };

    let config = match cli.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };
    let conn = careerpath_core::db::open_db(&db_path)?;
    let mut service = CareerService::new(SqliteStateRepository::new(&conn), config);
    let found = service.load()?;
    service
        .board_mut()
        .resize(ContainerRect::new(0.0, 0.0, cli.width, 0.0));
    info!("event=cli_dump module=cli status=ok record_found={found}");

    print_scene(&service.board().scene());
    Ok(())
}

fn print_scene(scene: &Scene) {
    println!(
        "canvas width={} height={} extent={}",
        scene.canvas_width, scene.canvas_height, scene.extent_width
    );
    for node in &scene.timeline.nodes {
        println!(
            "event {} x={:.1} y={:.1} tail={}",
            node.event_id, node.position.x, node.position.y, node.is_tail
        );
    }
    println!("timeline d=\"{}\"", scene.timeline.curve.to_svg_path_data());

    for layout in &scene.objectives {
        println!(
            "objective {} color={} visible={} steps={}",
            layout.objective_id,
            layout.color,
            layout.is_visible,
            layout.steps.len()
        );
        for step in &layout.steps {
            let key = NodeKey::objective_step(step.objective_id, step.step_index);
            if let Some(position) = scene.node_position(key) {
                println!(
                    "  step {} x={:.1} y={:.1} final={}",
                    step.step_index, position.x, position.y, step.is_final
                );
            }
        }
        println!("  d=\"{}\"", layout.curve.to_svg_path_data());
    }
}
