//! Operation: produce the publishable artifact set.
//!
//! Three artifacts come out of a packaging run: the binary jar (compiled
//! classes), the `-sources` jar, and the `-javadoc` jar. Jar writing is
//! deterministic: entries are sorted, timestamps fixed, and the jar
//! manifest is always the first entry, so identical inputs produce
//! byte-identical artifacts.

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use stagehand_core::metadata::JarAttributes;
use stagehand_maven::types::Artifact;
use stagehand_util::errors::StagehandError;
use stagehand_util::process::CommandBuilder;
use stagehand_util::progress::{status, status_info};

use crate::PublishContext;

/// Options for a packaging invocation.
#[derive(Default)]
pub struct PackageOptions {
    /// Use an existing classes directory instead of invoking `javac`.
    pub classes_dir: Option<PathBuf>,
    /// Suppress non-error output (used by `stagehand publish`).
    pub quiet: bool,
}

/// Result of a packaging run: the three artifacts, in upload order.
pub struct PackageResult {
    pub artifacts: Vec<Artifact>,
    pub out_dir: PathBuf,
}

/// JDK tool names, resolved from `JAVA_HOME` when it points at a real JDK,
/// otherwise left to `PATH` lookup.
struct JdkTools {
    javac: String,
    javadoc: String,
}

fn resolve_jdk() -> JdkTools {
    if let Ok(home) = std::env::var("JAVA_HOME") {
        let bin = Path::new(&home).join("bin");
        if bin.join("javac").is_file() {
            return JdkTools {
                javac: bin.join("javac").to_string_lossy().to_string(),
                javadoc: bin.join("javadoc").to_string_lossy().to_string(),
            };
        }
    }
    JdkTools {
        javac: "javac".to_string(),
        javadoc: "javadoc".to_string(),
    }
}

/// Run the packaging step for a loaded project.
pub fn package(ctx: &PublishContext, opts: &PackageOptions) -> miette::Result<PackageResult> {
    let project = &ctx.manifest.project;
    let layout = ctx.manifest.package_section();

    if !opts.quiet {
        status("Packaging", &format!("{} v{}", project.name, project.version));
    }

    let sources_dir = ctx.project_dir.join(&layout.sources_dir);
    let sources = collect_files_with_extension(&sources_dir, "java");
    if sources.is_empty() {
        return Err(StagehandError::Packaging {
            message: format!("No Java sources found under {}", sources_dir.display()),
        }
        .into());
    }

    stagehand_util::fs::ensure_dir(&ctx.out_dir).map_err(StagehandError::Io)?;

    let tools = resolve_jdk();
    let attrs = JarAttributes::from_manifest(&ctx.manifest);
    let manifest_mf = attrs.render();

    // Binary jar: compile unless a prebuilt classes directory was given.
    let classes_dir = match opts
        .classes_dir
        .clone()
        .or_else(|| layout.classes_dir.as_ref().map(|d| ctx.project_dir.join(d)))
    {
        Some(dir) => dir,
        None => compile_sources(&tools, &sources, &ctx.out_dir)?,
    };

    let stem = format!("{}-{}", project.name, project.version);
    let main_jar = ctx.out_dir.join(format!("{stem}.jar"));
    let mut trees = vec![classes_dir];
    if let Some(ref resources) = layout.resources_dir {
        let dir = ctx.project_dir.join(resources);
        if dir.is_dir() {
            trees.push(dir);
        }
    }
    write_jar_from_trees(&main_jar, &manifest_mf, &trees)?;

    // Sources jar.
    let sources_jar = ctx.out_dir.join(format!("{stem}-sources.jar"));
    write_jar_from_trees(&sources_jar, &manifest_mf, &[sources_dir.clone()])?;

    // Javadoc jar, with the generated-script fix applied first.
    let docs_dir = ctx.out_dir.join("javadoc");
    run_javadoc(&tools, ctx, &sources, &docs_dir)?;
    fix_javadoc_search(&docs_dir)?;
    let javadoc_jar = ctx.out_dir.join(format!("{stem}-javadoc.jar"));
    write_jar_from_trees(&javadoc_jar, &manifest_mf, &[docs_dir])?;

    let artifacts = vec![
        Artifact::jar(main_jar),
        Artifact::classified_jar(sources_jar, "sources"),
        Artifact::classified_jar(javadoc_jar, "javadoc"),
    ];

    if !opts.quiet {
        for artifact in &artifacts {
            status_info("Output", &artifact.path.display().to_string());
        }
    }

    Ok(PackageResult {
        artifacts,
        out_dir: ctx.out_dir.clone(),
    })
}

fn compile_sources(
    tools: &JdkTools,
    sources: &[PathBuf],
    out_dir: &Path,
) -> miette::Result<PathBuf> {
    let classes_dir = out_dir.join("classes");
    stagehand_util::fs::ensure_dir(&classes_dir).map_err(StagehandError::Io)?;

    let mut cmd = CommandBuilder::new(&tools.javac)
        .arg("-d")
        .arg(classes_dir.to_string_lossy().to_string())
        .arg("-encoding")
        .arg("UTF-8");
    for src in sources {
        cmd = cmd.arg(src.to_string_lossy().to_string());
    }

    let output = cmd.exec()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StagehandError::Packaging {
            message: format!("javac failed:\n{stderr}"),
        }
        .into());
    }
    Ok(classes_dir)
}

fn run_javadoc(
    tools: &JdkTools,
    ctx: &PublishContext,
    sources: &[PathBuf],
    docs_dir: &Path,
) -> miette::Result<()> {
    stagehand_util::fs::ensure_dir(docs_dir).map_err(StagehandError::Io)?;

    let title = format!(
        "{} {} API",
        ctx.manifest.project.display_name(),
        ctx.manifest.project.version
    );

    let mut cmd = CommandBuilder::new(&tools.javadoc)
        .arg("-d")
        .arg(docs_dir.to_string_lossy().to_string())
        .arg("-quiet")
        .arg("-encoding")
        .arg("UTF-8")
        .arg("-doctitle")
        .arg(&title)
        .arg("-windowtitle")
        .arg(&title);
    for src in sources {
        cmd = cmd.arg(src.to_string_lossy().to_string());
    }

    let output = cmd.exec()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StagehandError::Packaging {
            message: format!("javadoc failed:\n{stderr}"),
        }
        .into());
    }
    Ok(())
}

/// The broken conditional emitted into `search.js` (JDK-8215291).
const SEARCH_JS_BROKEN: &str = "if (ui.item.p == item.l) {";
/// Its fixed form.
const SEARCH_JS_FIXED: &str = "if (item.m && ui.item.p == item.l) {";

/// Apply the javadoc search fix to a `search.js` body. Returns `None` when
/// the file does not contain the broken line (already fixed, or a JDK that
/// no longer generates it).
pub fn apply_search_fix(content: &str) -> Option<String> {
    if content.contains(SEARCH_JS_BROKEN) {
        Some(content.replace(SEARCH_JS_BROKEN, SEARCH_JS_FIXED))
    } else {
        None
    }
}

/// Rewrite `search.js` inside a javadoc output tree, when present.
fn fix_javadoc_search(docs_dir: &Path) -> miette::Result<()> {
    let search_js = docs_dir.join("search.js");
    if !search_js.is_file() {
        return Ok(());
    }
    let content = std::fs::read_to_string(&search_js).map_err(StagehandError::Io)?;
    if let Some(fixed) = apply_search_fix(&content) {
        std::fs::write(&search_js, fixed).map_err(StagehandError::Io)?;
        tracing::debug!("applied search.js fix in {}", docs_dir.display());
    }
    Ok(())
}

/// Recursively collect files with the given extension, sorted by path.
fn collect_files_with_extension(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_into(root, &mut |path| {
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path.to_path_buf());
        }
    });
    files.sort();
    files
}

fn collect_into(dir: &Path, visit: &mut impl FnMut(&Path)) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, visit);
        } else {
            visit(&path);
        }
    }
}

/// Collect every file under `root` as `(zip entry name, absolute path)`,
/// sorted by entry name. Entry names always use forward slashes.
fn collect_tree(root: &Path) -> Vec<(String, PathBuf)> {
    let mut entries = Vec::new();
    collect_into(root, &mut |path| {
        let rel = path.strip_prefix(root).expect("path is under root");
        let name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        entries.push((name, path.to_path_buf()));
    });
    entries.sort();
    entries
}

/// Write a jar containing the merged contents of `trees`, with the given
/// `META-INF/MANIFEST.MF` as the first entry.
pub fn write_jar_from_trees(
    jar_path: &Path,
    manifest_mf: &str,
    trees: &[PathBuf],
) -> miette::Result<()> {
    let mut entries = Vec::new();
    for tree in trees {
        entries.extend(collect_tree(tree));
    }
    entries.sort();
    write_jar(jar_path, manifest_mf, &entries)
}

fn write_jar(
    jar_path: &Path,
    manifest_mf: &str,
    entries: &[(String, PathBuf)],
) -> miette::Result<()> {
    fn zip_err(e: impl std::fmt::Display, jar: &Path) -> miette::Report {
        StagehandError::Packaging {
            message: format!("Failed to write {}: {e}", jar.display()),
        }
        .into()
    }

    // Fixed timestamp and mode keep the output byte-identical across runs.
    fn entry_options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644)
    }

    let file = std::fs::File::create(jar_path).map_err(StagehandError::Io)?;
    let mut zip = ZipWriter::new(file);

    zip.start_file("META-INF/MANIFEST.MF", entry_options())
        .map_err(|e| zip_err(e, jar_path))?;
    zip.write_all(manifest_mf.as_bytes())
        .map_err(|e| zip_err(e, jar_path))?;

    for (name, path) in entries {
        let data = std::fs::read(path).map_err(StagehandError::Io)?;
        zip.start_file(name.as_str(), entry_options())
            .map_err(|e| zip_err(e, jar_path))?;
        zip.write_all(&data).map_err(|e| zip_err(e, jar_path))?;
    }

    zip.finish().map_err(|e| zip_err(e, jar_path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn search_fix_rewrites_broken_conditional() {
        let content = "prev();\nif (ui.item.p == item.l) {\n  next();\n}";
        let fixed = apply_search_fix(content).unwrap();
        assert!(fixed.contains("if (item.m && ui.item.p == item.l) {"));
        assert!(!fixed.contains("\nif (ui.item.p == item.l) {"));
    }

    #[test]
    fn search_fix_is_a_noop_on_fixed_content() {
        let content = "if (item.m && ui.item.p == item.l) {";
        assert!(apply_search_fix(content).is_none());
    }

    #[test]
    fn search_fix_is_a_noop_on_unrelated_content() {
        assert!(apply_search_fix("function search() {}").is_none());
    }

    fn sample_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let pkg = tmp.path().join("com/example");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("B.class"), b"cafebabe-b").unwrap();
        std::fs::write(pkg.join("A.class"), b"cafebabe-a").unwrap();
        std::fs::write(tmp.path().join("root.txt"), b"root").unwrap();
        tmp
    }

    #[test]
    fn collect_tree_is_sorted_with_forward_slashes() {
        let tmp = sample_tree();
        let entries = collect_tree(tmp.path());
        let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["com/example/A.class", "com/example/B.class", "root.txt"]
        );
    }

    #[test]
    fn jar_manifest_is_first_entry() {
        let tmp = sample_tree();
        let jar = tmp.path().join("out.jar");
        write_jar_from_trees(&jar, "Manifest-Version: 1.0\r\n", &[tmp.path().to_path_buf()])
            .unwrap();

        let file = std::fs::File::open(&jar).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "META-INF/MANIFEST.MF");
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn jar_writing_is_deterministic() {
        let tmp = sample_tree();
        let jar_a = tmp.path().join("a.jar");
        let jar_b = tmp.path().join("b.jar");
        let tree = tmp.path().join("com");
        write_jar_from_trees(&jar_a, "Manifest-Version: 1.0\r\n", &[tree.clone()]).unwrap();
        write_jar_from_trees(&jar_b, "Manifest-Version: 1.0\r\n", &[tree]).unwrap();

        let a = std::fs::read(&jar_a).unwrap();
        let b = std::fs::read(&jar_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn collect_files_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("Main.java"), "class Main {}").unwrap();
        std::fs::write(src.join("notes.txt"), "not java").unwrap();

        let files = collect_files_with_extension(tmp.path(), "java");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Main.java"));
    }
}
