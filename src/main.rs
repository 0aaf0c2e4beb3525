use clap::Parser;
use sizechart_common::api::{self, RecommendationRequest};
use sizechart_rust::{analyzer, cli, config, error, export, logging, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::path::Path;

/// JSONを書き出す（出力先が無ければ標準出力）
fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("✔ 結果を保存: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Parse { input, output, use_cache } => {
            // 標準出力にJSONを出すときは進捗を標準エラーへ
            let quiet = output.is_none();
            let progress = |msg: &str| {
                if quiet {
                    eprintln!("{}", msg);
                } else {
                    println!("{}", msg);
                }
            };

            progress("[1/2] OCRテキストをスキャン中...");
            let files = scanner::scan_input(&input)?;
            if files.is_empty() {
                return Err(error::SizeChartError::NoTextFound(input.display().to_string()));
            }
            progress(&format!("✔ {}件のテキストを検出", files.len()));

            progress(&format!(
                "[2/2] サイズ表を復元中...{}",
                if use_cache { " (キャッシュ有効)" } else { "" }
            ));
            let results = if use_cache && input.is_dir() {
                analyzer::parse_files_with_cache(&files, &input, &config.parse)?
            } else {
                analyzer::parse_files(&files, &config.parse)?
            };
            let found = results.iter().filter(|r| !r.response.structured.rows.is_empty()).count();
            progress(&format!("✔ 復元完了: {}/{}件でサイズ表を検出", found, results.len()));

            if input.is_file() {
                write_json(&results[0].response, output.as_deref())?;
            } else {
                write_json(&results, output.as_deref())?;
            }
        }

        Commands::Recommend { request, output } => {
            if !request.exists() {
                return Err(error::SizeChartError::FileNotFound(request.display().to_string()));
            }
            let content = std::fs::read_to_string(&request)?;
            let request: RecommendationRequest = serde_json::from_str(&content)?;
            let response = api::recommend(&request, &config.fit)?;

            if output.is_some() {
                if let Some(right) = &response.recommendation.right_fit {
                    println!("ジャストサイズ: {} ({:.2})", right.size, right.score);
                }
                if let Some(baggy) = &response.recommendation.baggy_fit {
                    println!("ゆったりサイズ: {} ({:.2})", baggy.size, baggy.score);
                }
            }
            write_json(&response, output.as_deref())?;
        }

        Commands::Export { input, output } => {
            println!("📄 sizechart - エクスポート\n");

            let chart = export::load_chart(&input)?;
            let output_path = export::output_path_for(&input, output.as_deref());

            println!("- Excelを生成中...");
            export::export_excel(&chart, &output_path)?;
            println!("✔ Excel出力: {}", output_path.display());
        }

        Commands::Config { show, init } => {
            if init {
                let path = config.save()?;
                println!("✔ 設定ファイルを作成しました: {}", path.display());
            }

            if show || !init {
                println!("設定: {}", Config::config_path()?.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| std::path::PathBuf::from("."));
            let cache_path = analyzer::CacheFile::cache_path(&target);

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match analyzer::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}
