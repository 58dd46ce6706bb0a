//! POM descriptor generation.
//!
//! The POM carries everything a consumer needs to resolve and attribute the
//! publication: coordinates, packaging, descriptive metadata, license,
//! developer records, SCM and issue-tracker links, and the declared API
//! dependencies.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use stagehand_core::manifest::Manifest;
use stagehand_core::metadata::{self, ScmCoordinates};
use stagehand_util::errors::StagehandError;

const APACHE2_URL: &str = "https://www.apache.org/licenses/LICENSE-2.0.txt";

fn xml_err(e: impl std::fmt::Display) -> miette::Report {
    StagehandError::Generic {
        message: format!("Failed to write POM XML: {e}"),
    }
    .into()
}

type Xml = Writer<Cursor<Vec<u8>>>;

fn open(writer: &mut Xml, tag: &str) -> miette::Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(xml_err)
}

fn close(writer: &mut Xml, tag: &str) -> miette::Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(xml_err)
}

fn text(writer: &mut Xml, tag: &str, value: &str) -> miette::Result<()> {
    open(writer, tag)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_err)?;
    close(writer, tag)
}

/// Generate the `pom.xml` for a validated manifest.
pub fn generate(manifest: &Manifest) -> miette::Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    let mut project = BytesStart::new("project");
    project.push_attribute(("xmlns", "http://maven.apache.org/POM/4.0.0"));
    project.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    project.push_attribute((
        "xsi:schemaLocation",
        "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd",
    ));
    writer.write_event(Event::Start(project)).map_err(xml_err)?;

    text(&mut writer, "modelVersion", "4.0.0")?;
    text(&mut writer, "groupId", &manifest.project.group)?;
    text(&mut writer, "artifactId", &manifest.project.name)?;
    text(&mut writer, "version", &manifest.project.version)?;
    text(&mut writer, "packaging", "jar")?;
    text(&mut writer, "name", manifest.project.display_name())?;
    text(&mut writer, "description", &manifest.project.description)?;

    if let Some(url) = metadata::project_url(manifest) {
        text(&mut writer, "url", &url)?;
    }

    if let Some(ref org) = manifest.organization {
        open(&mut writer, "organization")?;
        text(&mut writer, "name", &org.name)?;
        if let Some(ref url) = org.url {
            text(&mut writer, "url", url)?;
        }
        close(&mut writer, "organization")?;
    }

    if let Some(ref license) = manifest.license {
        open(&mut writer, "licenses")?;
        open(&mut writer, "license")?;
        text(&mut writer, "name", &license.pom_name())?;
        let url = license.url.as_deref().unwrap_or(APACHE2_URL);
        text(&mut writer, "url", url)?;
        close(&mut writer, "license")?;
        close(&mut writer, "licenses")?;
    }

    open(&mut writer, "developers")?;
    for dev in &manifest.developers {
        open(&mut writer, "developer")?;
        text(&mut writer, "id", &dev.id)?;
        text(&mut writer, "name", &dev.name)?;
        text(&mut writer, "email", &dev.email)?;
        close(&mut writer, "developer")?;
    }
    close(&mut writer, "developers")?;

    if let Some(ref github) = manifest.github {
        let scm = ScmCoordinates::from_github(github);
        open(&mut writer, "scm")?;
        text(&mut writer, "connection", &scm.connection)?;
        text(&mut writer, "developerConnection", &scm.developer_connection)?;
        text(&mut writer, "url", &scm.url)?;
        close(&mut writer, "scm")?;

        if let Some(issues) = metadata::issues_url(github) {
            open(&mut writer, "issueManagement")?;
            text(&mut writer, "system", "GitHub Issues")?;
            text(&mut writer, "url", &issues)?;
            close(&mut writer, "issueManagement")?;
        }
    }

    if !manifest.dependencies.is_empty() {
        open(&mut writer, "dependencies")?;
        for (coordinate, entry) in &manifest.dependencies {
            let Some((group, artifact)) = coordinate.split_once(':') else {
                return Err(StagehandError::Config {
                    message: format!(
                        "invalid dependency coordinate `{coordinate}` (expected group:artifact)"
                    ),
                }
                .into());
            };
            open(&mut writer, "dependency")?;
            text(&mut writer, "groupId", group)?;
            text(&mut writer, "artifactId", artifact)?;
            text(&mut writer, "version", entry.version())?;
            text(&mut writer, "scope", entry.scope())?;
            close(&mut writer, "dependency")?;
        }
        close(&mut writer, "dependencies")?;
    }

    close(&mut writer, "project")?;

    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(bytes).map_err(xml_err)?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_core::manifest::Manifest;

    const MANIFEST: &str = r#"
[project]
name = "extension-sdk"
group = "com.example"
version = "4.2.0"
description = "SDK for the development of extensions"
readable-name = "Example Extension SDK"

[organization]
name = "Example GmbH"
url = "https://www.example.com/"

[license]
id = "Apache-2.0"

[[developers]]
id = "jdoe"
name = "Jane Doe"
email = "jane.doe@example.com"

[github]
org = "example"
repo = "extension-sdk"

[dependencies]
"io.dropwizard.metrics:metrics-core" = "4.2.25"
"org.slf4j:slf4j-api" = "2.0.13"
"#;

    fn manifest() -> Manifest {
        Manifest::from_str(MANIFEST).unwrap()
    }

    #[test]
    fn pom_carries_coordinates_and_packaging() {
        let xml = generate(&manifest()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<groupId>com.example</groupId>"));
        assert!(xml.contains("<artifactId>extension-sdk</artifactId>"));
        assert!(xml.contains("<version>4.2.0</version>"));
        assert!(xml.contains("<packaging>jar</packaging>"));
        assert!(xml.contains("<name>Example Extension SDK</name>"));
    }

    #[test]
    fn pom_carries_license_and_developers() {
        let xml = generate(&manifest()).unwrap();
        assert!(xml.contains("<name>The Apache License, Version 2.0</name>"));
        assert!(xml.contains("<url>https://www.apache.org/licenses/LICENSE-2.0.txt</url>"));
        assert!(xml.contains("<id>jdoe</id>"));
        assert!(xml.contains("<email>jane.doe@example.com</email>"));
    }

    #[test]
    fn pom_carries_scm_and_issue_management() {
        let xml = generate(&manifest()).unwrap();
        assert!(xml.contains("<connection>scm:git:git://github.com/example/extension-sdk.git</connection>"));
        assert!(xml.contains(
            "<developerConnection>scm:git:ssh://git@github.com/example/extension-sdk.git</developerConnection>"
        ));
        assert!(xml.contains("<url>https://github.com/example/extension-sdk/issues</url>"));
    }

    #[test]
    fn pom_dependencies_use_compile_scope() {
        let xml = generate(&manifest()).unwrap();
        assert!(xml.contains("<artifactId>metrics-core</artifactId>"));
        assert!(xml.contains("<artifactId>slf4j-api</artifactId>"));
        assert!(xml.contains("<scope>compile</scope>"));

        // BTreeMap ordering: dropwizard before slf4j.
        let metrics = xml.find("metrics-core").unwrap();
        let slf4j = xml.find("slf4j-api").unwrap();
        assert!(metrics < slf4j);
    }

    #[test]
    fn description_is_escaped() {
        let mut m = manifest();
        m.project.description = "SDK for <extensions> & more".to_string();
        let xml = generate(&m).unwrap();
        assert!(xml.contains("SDK for &lt;extensions&gt; &amp; more"));
    }

    #[test]
    fn invalid_dependency_coordinate_is_rejected() {
        let mut m = manifest();
        m.dependencies
            .insert("not-a-coordinate".to_string(), toml_dep("1.0"));
        let err = generate(&m).unwrap_err();
        assert!(format!("{err}").contains("not-a-coordinate"));
    }

    fn toml_dep(version: &str) -> stagehand_core::manifest::DependencyEntry {
        stagehand_core::manifest::DependencyEntry::Version(version.to_string())
    }

    #[test]
    fn minimal_manifest_omits_optional_blocks() {
        let minimal = r#"
[project]
name = "lib"
group = "com.example"
version = "1.0.0"
description = "A library"

[license]
id = "Apache-2.0"

[[developers]]
id = "dev"
name = "Dev"
email = "dev@example.com"
"#;
        let xml = generate(&Manifest::from_str(minimal).unwrap()).unwrap();
        assert!(!xml.contains("<scm>"));
        assert!(!xml.contains("<issueManagement>"));
        assert!(!xml.contains("<dependencies>"));
        assert!(!xml.contains("<organization>"));
    }
}
