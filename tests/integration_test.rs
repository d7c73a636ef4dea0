use std::io::{Cursor, Read};
use std::path::PathBuf;

use form_quiz_export::config::Config;
use form_quiz_export::utils::logging;
use form_quiz_export::{extract_and_render, extract_document, App, MarkerSet, OutputFormat};
use lopdf::content::Content;
use lopdf::{Document, Object};

const QUIZ_A: &str = r#"
<html><body>
  <div class="F9yp7e">Quiz A</div>
  <div class="OxAavc">
    <div class="HoXoMd"><span class="M7eMe">Capital of the Philippines?</span></div>
    <div class="yUJIWb"><span class="aDTYNe snByac">Cebu</span></div>
    <div class="yUJIWb"><span class="aDTYNe snByac">Manila</span><div class="fKfAyc">Tama</div></div>
    <div class="PcXV5e"><div class="sIQxvc"><div>Manila is the capital.</div></div></div>
  </div>
</body></html>"#;

const QUIZ_WRONG: &str = r#"
<html><body>
  <div class="F9yp7e">Quiz B</div>
  <div class="OxAavc">
    <span class="M7eMe">Largest island?</span>
    <div class="yUJIWb"><span class="aDTYNe snByac">Luzon</span><div class="fKfAyc">Correct</div></div>
    <div class="yUJIWb"><span class="aDTYNe snByac">Mindanao</span></div>
    <div class="KYvWVd">Mali</div>
  </div>
</body></html>"#;

/// 按顺序取出 PDF 中所有 Tj 文字
fn pdf_texts(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("应该是合法的 PDF");
    let mut texts = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for op in content.operations {
            if op.operator == "Tj" {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    texts.push(bytes.iter().map(|&b| b as char).collect());
                }
            }
        }
    }
    texts
}

fn docx_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("应该是合法的 zip");
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("form_quiz_export_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_extract_quiz_a() {
    let extraction = extract_document(QUIZ_A, &MarkerSet::default()).unwrap();
    let model = extraction.model;

    assert_eq!(model.title, "Quiz A");
    assert_eq!(model.items.len(), 1);
    let item = &model.items[0];
    assert_eq!(item.answers.len(), 2);
    assert!(!item.answers[0].is_correct);
    assert!(item.answers[1].is_correct);
    assert_eq!(item.feedback, "Manila is the capital.");
    assert!(!item.is_incorrect);
}

#[test]
fn test_quiz_a_pdf() {
    let bytes = extract_and_render(QUIZ_A, OutputFormat::Pdf).unwrap();
    let texts = pdf_texts(&bytes);

    for expected in [
        "Quiz A",
        "Question 1:",
        "A. Cebu",
        "B. Manila",
        "Feedback:",
        "Total Questions: 1",
    ] {
        assert!(texts.iter().any(|t| t == expected), "缺少 {:?}", expected);
    }
    assert!(!texts.iter().any(|t| t.starts_with("Incorrect Answers")));
}

#[test]
fn test_quiz_a_docx() {
    let bytes = extract_and_render(QUIZ_A, OutputFormat::Docx).unwrap();
    let xml = docx_xml(&bytes);

    for expected in [
        "Quiz A",
        "Question 1:",
        "A. Cebu",
        "B. Manila",
        "Feedback:",
        "Total Questions: 1",
    ] {
        assert!(xml.contains(expected), "缺少 {:?}", expected);
    }
    assert!(!xml.contains("Incorrect Answers"));
}

#[test]
fn test_incorrect_question_in_both_formats() {
    let texts = pdf_texts(&extract_and_render(QUIZ_WRONG, OutputFormat::Pdf).unwrap());
    let labels: Vec<&String> = texts.iter().filter(|t| t.contains("[WRONG ANSWER]")).collect();
    assert_eq!(labels, vec!["Question 1: [WRONG ANSWER]"]);
    assert!(texts.iter().any(|t| t == "Incorrect Answers: 1"));

    let xml = docx_xml(&extract_and_render(QUIZ_WRONG, OutputFormat::Docx).unwrap());
    assert_eq!(xml.matches("[WRONG ANSWER]").count(), 1);
    assert!(xml.contains("Incorrect Answers: 1"));
}

#[test]
fn test_document_without_blocks() {
    let texts = pdf_texts(&extract_and_render("<html></html>", OutputFormat::Pdf).unwrap());
    assert_eq!(texts, vec!["Form Questions and Answers", "Total Questions: 0"]);

    let xml = docx_xml(&extract_and_render("<html></html>", OutputFormat::Docx).unwrap());
    assert!(xml.contains("Total Questions: 0"));
}

#[test]
fn test_app_exports_local_file() {
    logging::init(false);
    let dir = scratch_dir("app");
    let source = dir.join("form.html");
    std::fs::write(&source, QUIZ_A).unwrap();

    let config = Config {
        form_url: source.display().to_string(),
        file_name: "quiz_a".to_string(),
        file_type: "docx".to_string(),
        output_dir: dir.join("out").display().to_string(),
        ..Default::default()
    };

    let path = tokio_test::block_on(async {
        let app = App::initialize(config).await.unwrap();
        app.run().await.unwrap()
    });

    assert_eq!(path, dir.join("out").join("quiz_a.docx"));
    let xml = docx_xml(&std::fs::read(&path).unwrap());
    assert!(xml.contains("B. Manila"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_app_with_custom_markers() {
    let dir = scratch_dir("markers");
    let source = dir.join("form.html");
    std::fs::write(
        &source,
        QUIZ_A.replace("Tama", "Richtig"),
    )
    .unwrap();
    let markers = dir.join("markers.toml");
    std::fs::write(&markers, "correct_words = [\"richtig\"]\n").unwrap();

    let config = Config {
        form_url: format!("file://{}", source.display()),
        file_type: "pdf".to_string(),
        output_dir: dir.display().to_string(),
        markers_file: Some(markers.display().to_string()),
        ..Default::default()
    };

    let app = App::initialize(config).await.unwrap();
    let path = app.run().await.unwrap();
    let texts = pdf_texts(&std::fs::read(&path).unwrap());
    assert!(texts.iter().any(|t| t == "B. Manila"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_export_remote_form() {
    logging::init(true);

    // 需要设置 FORM_URL 为一个已批改的表单结果页
    let config = Config::from_env();
    let app = App::initialize(config).await.expect("初始化失败");
    let path = app.run().await.expect("导出失败");

    assert!(path.exists(), "应该生成输出文件");
}
