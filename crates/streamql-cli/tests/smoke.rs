use std::fs;
use std::io;
use std::process::Command;

use tempfile::tempdir;

/// Executes a command with the StreamQL CLI.
fn exec() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_streamql"));
    cmd.env_remove("STREAMQL_CONFIG");
    cmd
}

#[test]
fn test_help() -> io::Result<()> {
    let output = exec().arg("--help").output()?;
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Classifies token kinds"));
    assert!(stdout.contains("Highlights a source file"));
    Ok(())
}

#[test]
fn test_classify() -> io::Result<()> {
    let output = exec()
        .arg("classify")
        .args(["PLUS", "ID", "9999", "STRING", "SINGLE_LINE_COMMENT", "MULTILINE_COMMENT"])
        .output()?;
    assert!(output.status.success());

    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "PLUS (11): keyword",
            "ID (93): identifier",
            "unknown token (9999): none",
            "STRING (85): string-literal",
            "SINGLE_LINE_COMMENT (100): line-comment",
            "MULTILINE_COMMENT (101): block-comment",
        ]
    );
    Ok(())
}

#[test]
fn test_classify_unknown_name() -> io::Result<()> {
    let output = exec().arg("classify").arg("plus").output()?;
    assert!(!output.status.success());

    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("unknown token kind `plus`"));
    assert!(stderr.contains("hint"));
    Ok(())
}

#[test]
fn test_table_json() -> io::Result<()> {
    let output = exec().args(["table", "--format", "json"]).output()?;
    assert!(output.status.success());

    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = table.as_array().unwrap();
    assert_eq!(rows[0]["name"], "EOF");
    assert_eq!(rows[0]["code"], -1);
    assert!(rows[0]["tag"].is_null());

    let plus = rows.iter().find(|row| row["name"] == "PLUS").unwrap();
    assert_eq!(plus["literal"], "'+'");
    assert_eq!(plus["tag"], "keyword");
    assert_eq!(plus["key"], "STREAMQL_KEYWORD");
    assert_eq!(plus["fallback"], "KEYWORD");
    assert_eq!(plus["scope"], "keyword.streamql");

    let string = rows.iter().find(|row| row["name"] == "STRING").unwrap();
    assert_eq!(string["fallback"], "STRING");
    assert!(rows[0].get("fallback").is_none());
    Ok(())
}

#[test]
fn test_table_tokens_is_in_sync() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("StreamQL.tokens");

    let output = exec().args(["table", "--format", "tokens"]).output()?;
    assert!(output.status.success());
    fs::write(&path, &output.stdout)?;

    let output = exec().arg("check").arg(&path).output()?;
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout.trim(), "token kinds are in sync");
    Ok(())
}

#[test]
fn test_check_out_of_sync() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("StreamQL.tokens");
    fs::write(&path, "COL=1\nSCOL=7\nBRAND_NEW=300\n")?;

    let output = exec().arg("check").arg(&path).args(["--format", "json"]).output()?;
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["unknown"][0][0], "BRAND_NEW");
    assert_eq!(report["mismatched"][0]["name"], "SCOL");
    assert_eq!(report["mismatched"][0]["kind"], "SCOL");
    assert_eq!(report["mismatched"][0]["found"], 7);
    Ok(())
}

#[test]
fn test_check_malformed() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("broken.tokens");
    fs::write(&path, "COL=one\n")?;

    let output = exec().arg("check").arg(&path).output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("line 1: invalid token code `one`"));
    Ok(())
}

#[test]
fn test_highlight_html() -> io::Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("query.sql");
    let tokens = tmp.path().join("query.json");
    let html = tmp.path().join("query.html");

    fs::write(&input, "from S -- all\n")?;
    fs::write(
        &tokens,
        r#"[
            {"kind": "FROM", "span": [0, 4]},
            {"kind": "ID", "span": [5, 6]},
            {"kind": 100, "span": [7, 13]}
        ]"#,
    )?;

    let status = exec()
        .arg("highlight")
        .arg(&input)
        .arg("--tokens")
        .arg(&tokens)
        .arg("-o")
        .arg(&html)
        .status()?;
    assert!(status.success());

    assert_eq!(
        fs::read_to_string(&html)?,
        "<code><span class=\"sql-key\">from</span> <span class=\"sql-id\">S</span> \
         <span class=\"sql-line-comment\">-- all</span>\n</code>",
    );
    Ok(())
}

#[test]
fn test_highlight_unknown_kinds() -> io::Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("query.sql");
    let tokens = tmp.path().join("query.json");

    fs::write(&input, "from S x")?;
    fs::write(
        &tokens,
        r#"[
            {"kind": "FROM", "span": [0, 4]},
            {"kind": "NEW_KIND", "span": [5, 6]},
            {"kind": 5000000000, "span": [7, 8]}
        ]"#,
    )?;

    let output = exec().arg("highlight").arg(&input).arg("--tokens").arg(&tokens).output()?;
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert_eq!(stdout.trim_end(), "<code><span class=\"sql-key\">from</span> S x</code>");
    Ok(())
}

#[test]
fn test_highlight_overlapping_tokens() -> io::Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("query.sql");
    let tokens = tmp.path().join("query.json");

    fs::write(&input, "from S")?;
    fs::write(&tokens, r#"[{"kind": "FROM", "span": [0, 4]}, {"kind": "ID", "span": [2, 6]}]"#)?;

    let output = exec().arg("highlight").arg(&input).arg("--tokens").arg(&tokens).output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("overlaps the previous token"));
    Ok(())
}

#[test]
fn test_config_without_quirks() -> io::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("streamql.toml");
    fs::write(&config, "legacy-quirks = false\n\n[overrides]\nTRUE = \"string-literal\"\n")?;

    let output = exec()
        .arg("--config")
        .arg(&config)
        .args(["classify", "SPACES", "TRUE"])
        .output()?;
    assert!(output.status.success());

    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines, ["SPACES (102): none", "TRUE (84): string-literal"]);
    Ok(())
}
