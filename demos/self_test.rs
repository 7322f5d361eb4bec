//! 自我測試示例
//!
//! 執行：`RUST_LOG=debug cargo run --example self_test`

use matcache::{run_self_test, SelfTestConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== 逆矩陣快取自我測試 ===\n");

    let config = SelfTestConfig::new()
        .with_dimensions(1..=12)
        .with_rounds(4)
        .with_seed(2025);

    let report = run_self_test(&config)?;

    println!("維度\t輪數\t計算次數\t最大偏差");
    for dim in &report.dimensions {
        println!(
            "{}\t{}\t{}\t\t{}",
            dim.dimension, dim.rounds, dim.computations, dim.max_residual
        );
    }

    println!(
        "\n全部通過：共計算 {} 次，最大偏差 {}",
        report.total_computations(),
        report.worst_residual()
    );

    Ok(())
}
