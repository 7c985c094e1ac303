use std::ops::ControlFlow;

use tempfile::NamedTempFile;

use super::{DumpError, XMLParser};
use crate::pipeline::Document;

const DUMP: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" xml:lang="en">
  <siteinfo>
    <sitename>Wikipedia</sitename>
  </siteinfo>
  <page>
    <title>Paris</title>
    <ns>0</ns>
    <id>1</id>
    <revision>
      <id>10</id>
      <timestamp>2024-01-01T00:00:00Z</timestamp>
      <contributor><username>Someone</username></contributor>
      <text bytes="60" xml:space="preserve">'''Paris''' is a city.&lt;ref&gt;x&lt;/ref&gt; [[France|French]] &amp;nbsp;</text>
      <sha1>abc</sha1>
    </revision>
  </page>
  <page>
    <title>Lutetia</title>
    <ns>0</ns>
    <id>2</id>
    <redirect title="Paris" />
    <revision>
      <text>#REDIRECT [[Paris]]</text>
    </revision>
  </page>
  <page>
    <title>Template:Infobox</title>
    <ns>10</ns>
    <id>3</id>
    <revision>
      <text>{{{1}}}</text>
    </revision>
  </page>
  <page>
    <title>Mercury (disambiguation)</title>
    <ns>0</ns>
    <id>4</id>
    <revision>
      <text>Mercury may refer to:</text>
    </revision>
  </page>
  <page>
    <title>Berlin</title>
    <ns>0</ns>
    <id>5</id>
    <revision>
      <text bytes="0" />
    </revision>
  </page>
</mediawiki>
"#;

fn collect(xml: &str) -> Result<Vec<Document>, DumpError> {
    let mut parser = XMLParser::new(xml.as_bytes(), "en");
    let mut documents = Vec::new();
    parser.parse_xml(|document| {
        documents.push(document);
        ControlFlow::Continue(())
    })?;
    Ok(documents)
}

#[test]
fn articles_only() {
    let documents = collect(DUMP).unwrap();

    let titles: Vec<_> = documents.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Paris", "Berlin"]);
}

#[test]
fn text_is_unescaped() {
    let documents = collect(DUMP).unwrap();

    let paris = &documents[0];
    assert_eq!(paris.lang, "en");
    assert_eq!(paris.en_title, "Paris");
    assert_eq!(
        paris.text,
        "'''Paris''' is a city.<ref>x</ref> [[France|French]] &nbsp;"
    );

    // An empty <text /> element
    assert_eq!(documents[1].text, "");
}

#[test]
fn stop_early() {
    let mut parser = XMLParser::new(DUMP.as_bytes(), "en");
    let count = parser.parse_xml(|_| ControlFlow::Break(())).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn with_declaration() {
    let xml = "<?xml version=\"1.0\"?>\n<mediawiki><page><title>A</title><revision><text>a</text></revision></page></mediawiki>";
    let documents = collect(xml).unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].text, "a");
}

#[test]
fn wrong_root() {
    assert!(matches!(collect("<html></html>"), Err(DumpError::MissingRoot)));
    assert!(matches!(collect(""), Err(DumpError::MissingRoot)));
}

#[test]
fn truncated_page() {
    let xml = "<mediawiki><page><title>A</title><revision><text>a</text>";
    assert!(matches!(
        collect(xml),
        Err(DumpError::UnexpectedEof(_)) | Err(DumpError::XmlError { .. })
    ));
}

#[test]
fn from_file() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), DUMP).unwrap();

    let mut parser = XMLParser::from_file(file.path().to_str().unwrap(), "de").unwrap();
    let mut langs = Vec::new();
    let count = parser
        .parse_xml(|document| {
            langs.push(document.lang);
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(langs, vec!["de", "de"]);
}
