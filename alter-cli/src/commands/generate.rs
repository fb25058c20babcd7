use crate::app::CliApp;
use crate::cli::GenerateArgs;
use crate::request::{RequestFile, read_trigger_file};
use alter_core::ScriptError;
use alter_core::config::AppConfig;
use alter_core::input::{ColumnDraft, parse_drop_list};
use alter_core::sql_script::{
    ChangeSet, FsScriptSink, GenerationRequest, MemoryScriptSink, OutputLayout, ScriptAssembler,
    TriggerSet, generate_scripts,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// 根据命令行参数（或请求文件）构造生成请求，返回请求与输出目录
///
/// 所有校验都在这里完成，任何文件被写入之前就会失败
pub fn build_request(
    args: &GenerateArgs,
    config: &AppConfig,
) -> Result<(GenerationRequest, Option<PathBuf>)> {
    let (table, columns, drops, triggers, mirror, output) = match &args.request {
        Some(path) => {
            info!("📋 读取请求文件: {}", path.display());
            let file = RequestFile::load(path)?;
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            (
                args.table.clone().or_else(|| file.table.clone()),
                file.column_specs()?,
                file.drop.names(),
                file.trigger_set(base_dir)?,
                file.mirror,
                args.output
                    .clone()
                    .or_else(|| file.output.as_ref().map(|o| base_dir.join(o))),
            )
        }
        None => {
            let columns = match &args.columns {
                Some(names) if !names.trim().is_empty() => ColumnDraft {
                    names: names.clone(),
                    data_types: args.data_types.clone().unwrap_or_default(),
                    sizes: args.sizes.clone(),
                    nullabilities: args.nullability.clone(),
                    comments: args.comments.clone(),
                }
                .expand()?,
                _ => Vec::new(),
            };
            (
                args.table.clone(),
                columns,
                parse_drop_list(&args.drop),
                read_triggers(args)?,
                None,
                args.output.clone(),
            )
        }
    };

    let change_set = ChangeSet::new(table.as_deref().unwrap_or_default(), columns, drops)?;
    let mirror = !args.no_mirror && mirror.unwrap_or(config.mirror.enabled);

    Ok((
        GenerationRequest {
            change_set,
            triggers,
            mirror,
        },
        output,
    ))
}

fn read_triggers(args: &GenerateArgs) -> Result<TriggerSet> {
    let read = |path: &Option<PathBuf>| path.as_deref().map(read_trigger_file).transpose();
    Ok(TriggerSet::new(
        read(&args.insert_trigger)?,
        read(&args.update_trigger)?,
        read(&args.delete_trigger)?,
    ))
}

/// 执行 generate 命令
pub fn run_generate(app: &CliApp, args: GenerateArgs) -> Result<()> {
    let (request, output) = build_request(&args, &app.config)?;

    if args.dry_run {
        let bundle = ScriptAssembler::from_config(&app.config)?.assemble(&request)?;
        let base_dir = output.unwrap_or_else(|| PathBuf::from("."));
        let layout = OutputLayout::from_config(&app.config, &base_dir)?;
        let mut sink = MemoryScriptSink::default();
        bundle.write_to(&mut sink, &layout)?;
        for (path, content) in &sink.files {
            println!("-- ===== {} =====", path.display());
            println!("{content}");
            println!();
        }
        return Ok(());
    }

    let output = output.ok_or(ScriptError::MissingOutputDir)?;
    info!("🛠️  生成表 {} 的变更脚本", request.change_set.table_name());
    generate_scripts(&request, &app.config, &output, &mut FsScriptSink)
        .with_context(|| format!("生成脚本到 {} 失败", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args() -> GenerateArgs {
        GenerateArgs {
            nullability: "NULL".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_request_from_flags() {
        let dir = tempfile::tempdir().unwrap();
        let tji = dir.path().join("tji.sql");
        fs::write(&tji, "CREATE TRIGGER tji_emp\nBA_IND,\n'I',\n").unwrap();

        let args = GenerateArgs {
            table: Some("emp".into()),
            columns: Some("SALARY, BONUS".into()),
            data_types: Some("numeric".into()),
            sizes: "(10,2)".into(),
            nullability: "NOT NULL".into(),
            drop: "OLD_COL".into(),
            insert_trigger: Some(tji),
            output: Some(dir.path().to_path_buf()),
            ..args()
        };

        let (request, output) = build_request(&args, &AppConfig::default()).unwrap();
        assert_eq!(request.change_set.table_name(), "EMP");
        assert_eq!(request.change_set.added_names(), vec!["SALARY", "BONUS"]);
        assert_eq!(request.change_set.columns_to_drop(), ["OLD_COL".to_string()]);
        assert!(request.triggers.insert.text.contains("tji_emp"));
        assert!(request.triggers.update.is_blank());
        assert!(request.mirror);
        assert_eq!(output.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_build_request_validation() {
        let err = build_request(&args(), &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScriptError>(),
            Some(ScriptError::MissingTableName)
        ));

        let args = GenerateArgs {
            table: Some("EMP".into()),
            columns: Some("A".into()),
            ..args()
        };
        let err = build_request(&args, &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScriptError>(),
            Some(ScriptError::MissingDataType { .. })
        ));
    }

    #[test]
    fn test_mirror_flag_resolution() {
        let mut config = AppConfig::default();
        let base = GenerateArgs {
            table: Some("EMP".into()),
            ..args()
        };

        let (request, _) = build_request(&base, &config).unwrap();
        assert!(request.mirror);

        let no_mirror = GenerateArgs {
            no_mirror: true,
            ..base.clone()
        };
        let (request, _) = build_request(&no_mirror, &config).unwrap();
        assert!(!request.mirror);

        config.mirror.enabled = false;
        let (request, _) = build_request(&base, &config).unwrap();
        assert!(!request.mirror);
    }

    #[test]
    fn test_run_generate_with_request_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tji.sql"),
            "CREATE TRIGGER \"tji_emp\"\n    BA_IND,\n    'I',\n",
        )
        .unwrap();
        let request_path = dir.path().join("request.toml");
        fs::write(
            &request_path,
            r#"
table = "emp"
output = "out"
mirror = false

[[columns]]
name = "SALARY"
data_type = "numeric"
size = "(10,2)"
nullability = "NOT NULL"
comment = "monthly pay"

[triggers]
insert_file = "tji.sql"
"#,
        )
        .unwrap();

        let app = CliApp {
            config: AppConfig::default(),
        };
        let args = GenerateArgs {
            request: Some(request_path),
            ..args()
        };
        run_generate(&app, args).unwrap();

        let out = dir.path().join("out");
        let ddl = app.config.get_ddl_dir(&out);
        let forward = fs::read_to_string(ddl.join("EMP.sql")).unwrap();
        assert!(forward.starts_with("ALTER TABLE EMP\nADD SALARY numeric(10,2) NOT NULL;"));
        assert!(forward.contains("DROP TRIGGER IF EXISTS tji_emp ON EMP;"));
        assert!(forward.contains("new.SALARY,"));

        let rollback =
            fs::read_to_string(app.config.get_rollback_ddl_dir(&out).join("EMP_rollback.sql"))
                .unwrap();
        assert!(rollback.contains("DROP COLUMN SALARY;"));
        assert!(ddl.join("J_EMP.sql").exists());
    }

    #[test]
    fn test_run_generate_requires_output() {
        let app = CliApp {
            config: AppConfig::default(),
        };
        let args = GenerateArgs {
            table: Some("EMP".into()),
            ..args()
        };
        let err = run_generate(&app, args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScriptError>(),
            Some(ScriptError::MissingOutputDir)
        ));
    }
}
