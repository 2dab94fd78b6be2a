//! Sample content for testing and demonstration.
//!
//! A coursework report and a ten-slide project deck describing the same
//! CloudScript project. Both resolve against [`stylesheet`] and the
//! [`Theme::cloudscript`](crate::theme::Theme::cloudscript) preset.

use crate::content::{
    ContentNode, Document, DocumentBuilder, PageSetup, Paragraph, Run, Table, TableCell, TableRow,
    TocPlaceholder,
};
use crate::error::Result;
use crate::grid::{GridItem, GridSpec};
use crate::slide::{
    CardTemplate, Connector, Deck, Frame, GridGroup, Insets, LineSpec, ShapeKind, ShapeSpec,
    Slide, Slot, TextFrame, VerticalAlign,
};
use crate::style::{Alignment, StyleProps, StyleRegistry};
use crate::theme::ColorValue;

/// Stylesheet shared by the report and the deck.
pub fn stylesheet_json() -> &'static str {
    r##"{
  "defaults": {
    "run": { "font": { "role": "serif" }, "size_pt": 12 }
  },
  "styles": [
    { "id": "Normal", "name": "Normal" },
    {
      "id": "Heading1", "name": "Heading 1", "based_on": "Normal", "next": "Normal",
      "run": { "size_pt": 16, "bold": true },
      "paragraph": { "alignment": "center", "spacing_before_pt": 24, "spacing_after_pt": 12, "outline_level": 0 }
    },
    {
      "id": "Heading2", "name": "Heading 2", "based_on": "Normal", "next": "Normal",
      "run": { "size_pt": 14, "bold": true },
      "paragraph": { "spacing_before_pt": 18, "spacing_after_pt": 9, "outline_level": 1 }
    },
    {
      "id": "Heading3", "name": "Heading 3", "based_on": "Normal", "next": "Normal",
      "run": { "size_pt": 13, "bold": true },
      "paragraph": { "spacing_before_pt": 12, "spacing_after_pt": 6, "outline_level": 2 }
    },
    { "id": "TOCHeading", "name": "TOC Heading", "based_on": "Heading1" },
    { "id": "TOC1", "name": "toc 1", "based_on": "Normal", "run": { "bold": true }, "paragraph": { "spacing_before_pt": 6 } },
    { "id": "TOC2", "name": "toc 2", "based_on": "Normal" },
    { "id": "TOC3", "name": "toc 3", "based_on": "Normal", "run": { "italic": true } },
    { "id": "BodyText", "name": "Body Text", "based_on": "Normal", "paragraph": { "alignment": "justify", "spacing_before_pt": 6, "spacing_after_pt": 6 } },
    { "id": "Code", "name": "Code", "based_on": "Normal", "run": { "font": { "role": "mono" }, "size_pt": 10 } },
    { "id": "TableGrid", "name": "Table Grid", "based_on": "Normal", "run": { "size_pt": 11 } },

    { "id": "DeckBody", "name": "Deck Body", "run": { "font": { "role": "body" }, "size_pt": 14, "color": { "role": "text" } } },
    {
      "id": "DeckTitle", "name": "Deck Title", "based_on": "DeckBody",
      "run": { "font": { "role": "heading" }, "size_pt": 54, "bold": true, "color": { "role": "white" } },
      "paragraph": { "alignment": "center" }
    },
    {
      "id": "DeckSubtitle", "name": "Deck Subtitle", "based_on": "DeckBody",
      "run": { "size_pt": 20, "color": { "role": "secondary" } },
      "paragraph": { "alignment": "center" }
    },
    {
      "id": "DeckHeader", "name": "Deck Header", "based_on": "DeckBody",
      "run": { "font": { "role": "heading" }, "size_pt": 28, "bold": true, "color": { "role": "dark" } }
    },
    { "id": "DeckCaption", "name": "Deck Caption", "based_on": "DeckBody", "run": { "size_pt": 10, "color": { "role": "muted" } } },
    { "id": "DeckCode", "name": "Deck Code", "based_on": "DeckBody", "run": { "font": { "role": "mono" }, "size_pt": 11, "color": { "role": "code_text" } } },
    { "id": "CardTitle", "name": "Card Title", "based_on": "DeckBody", "run": { "bold": true }, "paragraph": { "alignment": "center" } },
    { "id": "CardText", "name": "Card Text", "based_on": "DeckBody", "run": { "color": { "role": "white" } }, "paragraph": { "alignment": "center" } }
  ]
}"##
}

/// Registry loaded from [`stylesheet_json`].
pub fn stylesheet() -> Result<StyleRegistry> {
    StyleRegistry::from_json(stylesheet_json())
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

fn centered(text: &str, size_pt: f32, bold: bool, before: f32, after: f32) -> Paragraph {
    let mut run = Run::new(text).size(size_pt);
    if bold {
        run = run.bold();
    }
    Paragraph::new()
        .style("Normal")
        .align(Alignment::Center)
        .spacing(before, after)
        .run(run)
}

/// Body paragraph opening with a bold lead-in.
fn lead(lead: &str, rest: &str) -> Paragraph {
    Paragraph::new()
        .style("BodyText")
        .run(Run::new(lead).bold())
        .text(rest)
}

fn body(text: &str) -> Paragraph {
    Paragraph::with_text(text).style("BodyText")
}

/// Abridged coursework report: title page, table of contents, four chapters.
pub fn coursework_report() -> Result<Document> {
    let mut b = DocumentBuilder::new("Разработка языка программирования для облачных сервисов");
    b.section(PageSetup::a4());

    // Title page
    b.paragraph(centered("УНИВЕРСИТЕТ", 14.0, true, 72.0, 0.0))
        .paragraph(centered("Факультет компьютерных наук", 12.0, false, 6.0, 0.0))
        .paragraph(centered("Кафедра теоретической информатики", 12.0, false, 3.0, 0.0))
        .paragraph(centered("КУРСОВАЯ РАБОТА", 16.0, true, 72.0, 72.0))
        .paragraph(centered("по дисциплине", 12.0, false, 0.0, 12.0))
        .paragraph(centered(
            "«Теория построения языков программирования»",
            13.0,
            true,
            0.0,
            24.0,
        ))
        .paragraph(centered("на тему:", 12.0, false, 0.0, 6.0))
        .paragraph(centered(
            "«Разработка языка программирования для облачных сервисов и микросервисной архитектуры»",
            14.0,
            true,
            0.0,
            48.0,
        ))
        .paragraph(
            Paragraph::with_text("Выполнил: студент группы ___________")
                .style("Normal")
                .align(Alignment::Right)
                .spacing(48.0, 0.0),
        )
        .paragraph(
            Paragraph::with_text("Научный руководитель:")
                .style("Normal")
                .align(Alignment::Right)
                .spacing(12.0, 0.0),
        )
        .paragraph(centered("2025", 14.0, true, 72.0, 0.0))
        .page_break();

    b.table_of_contents(TocPlaceholder {
        title: Some("СОДЕРЖАНИЕ".to_string()),
        ..TocPlaceholder::default()
    })
    .page_break();

    b.heading(0, "ВВЕДЕНИЕ")
        .paragraph(lead(
            "Актуальность темы. ",
            "Микросервисная архитектура стала стандартом для построения масштабируемых \
             приложений, но её развертывание требует Docker-контейнеров, конфигураций \
             Kubernetes и документации API.",
        ))
        .paragraph(lead(
            "Цель работы: ",
            "разработка предметно-ориентированного языка для облачных сервисов и \
             компилятора, генерирующего конфигурационные файлы и документацию.",
        ))
        .page_break();

    b.heading(0, "1. ТЕОРЕТИЧЕСКИЕ ОСНОВЫ ПОСТРОЕНИЯ ЯЗЫКОВ ПРОГРАММИРОВАНИЯ")
        .heading(1, "1.1. Классификация языков программирования")
        .paragraph(lead(
            "Предметно-ориентированные языки (DSL) ",
            "описывают задачи одной предметной области декларативно.",
        ))
        .heading(1, "1.2. Формальные грамматики и языки")
        .heading(1, "1.3. Этапы компиляции")
        .paragraph(lead("Лексический анализ (сканирование) ", "разбивает текст на токены."))
        .paragraph(lead("Синтаксический анализ (парсинг) ", "строит дерево разбора."))
        .paragraph(lead("Генерация кода ", "порождает целевые артефакты."))
        .page_break();

    b.heading(0, "2. МИКРОСЕРВИСНАЯ АРХИТЕКТУРА И ОБЛАЧНЫЕ ТЕХНОЛОГИИ")
        .heading(1, "2.1. Принципы микросервисной архитектуры")
        .heading(1, "2.2. Контейнеризация с использованием Docker")
        .heading(1, "2.3. Оркестрация контейнеров с Kubernetes")
        .heading(1, "2.4. Стандарты документирования API")
        .page_break();

    b.heading(0, "3. РАЗРАБОТКА ЯЗЫКА CLOUDSCRIPT")
        .heading(1, "3.1. Анализ требований и постановка задачи")
        .heading(1, "3.2. Разработка формальной грамматики")
        .paragraph(body("Фрагмент грамматики в форме EBNF:"))
        .paragraph(Paragraph::with_text("program     ::= service_def+").style("Code"))
        .paragraph(
            Paragraph::with_text("service_def ::= 'service' IDENTIFIER '{' service_body '}'")
                .style("Code"),
        )
        .heading(1, "3.3. Проектирование абстрактного синтаксического дерева")
        .page_break();

    b.heading(0, "4. РЕАЛИЗАЦИЯ КОМПИЛЯТОРА")
        .heading(1, "4.1. Лексический анализатор")
        .heading(1, "4.2. Синтаксический анализатор")
        .heading(1, "4.3. Генераторы кода")
        .heading(1, "4.4. Тестирование компилятора")
        .table(test_results_table())
        .heading(1, "4.5. Практические примеры использования")
        .paragraph(lead(
            "Пример 2: Платформа электронной коммерции. ",
            "Шесть сервисов, более тридцати конечных точек.",
        ))
        .page_break();

    b.heading(0, "ЗАКЛЮЧЕНИЕ")
        .paragraph(body(
            "CloudScript упрощает разработку микросервисов за счёт декларативного описания \
             и автоматической генерации конфигураций развертывания.",
        ))
        .page_break()
        .heading(0, "СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ")
        .paragraph(body(
            "1. Ахо А., Лам М., Сети Р., Ульман Дж. Компиляторы: принципы, технологии и \
             инструментарий. – 2-е изд. – М.: Вильямс, 2008.",
        ));

    b.finish()
}

fn test_results_table() -> Table {
    let header = ["Компонент", "Тестов", "Статус"]
        .into_iter()
        .map(|h| {
            TableCell::new()
                .block(ContentNode::Paragraph(
                    Paragraph::new().run(Run::new(h).bold()),
                ))
                .shading(ColorValue::role("background"))
        })
        .collect();
    let mut table = Table::new().style("TableGrid").row(TableRow::header(header));
    for (name, count) in [
        ("Лексический анализатор", "8"),
        ("Синтаксический анализатор", "10"),
        ("Генераторы кода", "6"),
        ("Сквозные тесты", "4"),
    ] {
        table = table.row(TableRow::new(vec![
            TableCell::with_text(name),
            TableCell::with_text(count),
            TableCell::with_text("✓"),
        ]));
    }
    table
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

fn header(text: &str) -> TextFrame {
    TextFrame::new(Frame::new(0.5, 0.5, 9.0, 0.7), "DeckHeader", text)
}

fn role(name: &str) -> ColorValue {
    ColorValue::role(name)
}

fn centered_props(size_pt: f32) -> StyleProps {
    StyleProps::new().size(size_pt).align(Alignment::Center)
}

/// Ten-slide project presentation.
pub fn cloudscript_deck() -> Deck {
    Deck::new("CloudScript")
        .slide(title_slide())
        .slide(problem_slide())
        .slide(solution_slide())
        .slide(architecture_slide())
        .slide(features_slide())
        .slide(outputs_slide())
        .slide(services_slide())
        .slide(testing_slide())
        .slide(results_slide())
        .slide(conclusion_slide())
}

fn title_slide() -> Slide {
    Slide::new()
        .background(role("dark"))
        .text(TextFrame::new(
            Frame::new(0.5, 2.0, 9.0, 1.5),
            "DeckTitle",
            "CloudScript",
        ))
        .text(TextFrame::new(
            Frame::new(0.5, 3.5, 9.0, 0.6),
            "DeckSubtitle",
            "Domain-Specific Language for Cloud Microservices",
        ))
        .text(
            TextFrame::rich(
                Frame::new(0.5, 5.0, 9.0, 0.8),
                vec![
                    Run::new("Theory of Programming Languages\n").size(14.0).color_role("white"),
                    Run::new("Course Project 2025").size(14.0).color_role("secondary"),
                ],
            )
            .style("DeckBody")
            .with(StyleProps::new().align(Alignment::Center)),
        )
}

fn problem_slide() -> Slide {
    let items: Vec<GridItem> = [
        ("❌", "Complex Configuration", "Docker, K8s, OpenAPI - too many files to manage"),
        ("⚠️", "Repetitive Boilerplate", "Same patterns repeated across services"),
        ("🔧", "Maintenance Burden", "Updates require changes in multiple places"),
        ("📚", "Steep Learning Curve", "Developers need expertise in many technologies"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (icon, title, desc))| GridItem::new(i, title).field("icon", icon).field("desc", desc))
    .collect();

    let card = CardTemplate::new()
        .slot(Slot::shape(ShapeKind::Oval, Some(role("primary")), 0.5).at(0.0, 0.0).width(0.5))
        .slot(
            Slot::field("icon", 0.5)
                .at(0.0, 0.0)
                .width(0.5)
                .with(centered_props(20.0))
                .valign(VerticalAlign::Middle),
        )
        .slot(
            Slot::label(0.3)
                .at(0.7, 0.0)
                .width(7.6)
                .style("DeckBody")
                .with(StyleProps::new().size(16.0).bold(true)),
        )
        .slot(
            Slot::field("desc", 0.3)
                .at(0.7, 0.35)
                .width(7.6)
                .style("DeckCaption")
                .with(StyleProps::new().size(12.0)),
        );

    Slide::new()
        .text(header("The Problem"))
        .grid(GridGroup::new(
            items,
            GridSpec::new(1, 8.3, 1.2).origin(0.7, 1.5),
            card,
        ))
}

fn solution_slide() -> Slide {
    let code = "service UserService {\n    endpoint /users {\n        method: GET\n        \
                response: User[]\n        cache: 5m\n    }\n\n    deploy on: kubernetes\n    \
                port: 8080\n}";
    Slide::new()
        .text(header("Our Solution: CloudScript"))
        .text(
            TextFrame::rich(
                Frame::new(0.5, 1.4, 9.0, 2.0),
                vec![
                    Run::new("One Language. ").bold().color_role("primary"),
                    Run::new("Multiple Outputs.\n\n"),
                    Run::new(
                        "CloudScript is a DSL that lets you define microservices in a simple, \
                         declarative syntax. ",
                    ),
                    Run::new(
                        "Our compiler automatically generates all deployment configurations, \
                         API docs, and containerization files.",
                    ),
                ],
            )
            .style("DeckBody")
            .with(StyleProps::new().size(16.0).color_role("text").align(Alignment::Center))
            .valign(VerticalAlign::Middle),
        )
        .shape(
            ShapeSpec::new(ShapeKind::Rectangle, Frame::new(1.5, 3.6, 7.0, 2.0))
                .fill(role("code_background"))
                .line(LineSpec::new(role("primary"), 2.0)),
        )
        .text(
            TextFrame::new(Frame::new(1.7, 3.8, 6.6, 1.6), "DeckCode", code)
                .valign(VerticalAlign::Middle),
        )
}

fn architecture_slide() -> Slide {
    let items = vec![
        GridItem::new(0, "Lexical Analysis").field("icon", "📝").field("desc", "Tokenization"),
        GridItem::new(1, "Syntax Analysis").field("icon", "🌳").field("desc", "Parse & Build AST"),
        GridItem::new(2, "Code Generation")
            .field("icon", "⚙️")
            .field("desc", "Docker, K8s, OpenAPI"),
    ];
    let card = CardTemplate::new()
        .background(ShapeKind::RoundedRectangle, role("background"))
        .line(LineSpec::new(role("primary"), 2.0))
        .slot(Slot::field("icon", 0.6).margin_top(0.3).with(centered_props(40.0)))
        .slot(Slot::label(0.5).margin_top(0.3).style("CardTitle"))
        .slot(Slot::field("desc", 0.6).style("DeckCaption").with(centered_props(11.0)))
        .connector(Connector {
            kind: ShapeKind::RightArrow,
            frame: Frame::new(2.5, 1.0, 0.5, 0.4),
            fill: Some(role("accent")),
        });

    Slide::new().text(header("Compiler Architecture")).grid(GridGroup::new(
        items,
        GridSpec::new(3, 2.4, 2.5).origin(1.0, 2.0).gaps(0.4, 0.0),
        card,
    ))
}

fn features_slide() -> Slide {
    let items = GridItem::from_labels([
        "🔤 Simple Syntax",
        "🚀 Multi-Platform",
        "📚 Auto-Documentation",
        "✅ Type-Safe",
        "🔌 Protocol Support",
        "💾 Database Integration",
    ]);
    let card = CardTemplate::new()
        .background(ShapeKind::RoundedRectangle, role("primary"))
        .slot(
            Slot::label(0.9)
                .style("CardText")
                .with(StyleProps::new().size(16.0).bold(true))
                .valign(VerticalAlign::Middle),
        );

    Slide::new().text(header("Key Features")).grid(GridGroup::new(
        items,
        GridSpec::new(2, 3.6, 0.9).origin(1.0, 1.7).gaps(0.6, 0.5),
        card,
    ))
}

fn outputs_slide() -> Slide {
    let outputs: [(&str, &[&str]); 3] = [
        ("Docker", &["Dockerfile", "docker-compose.yml", "requirements.txt", "app.py"]),
        ("Kubernetes", &["Deployments", "Services", "Ingress", "HPA", "ConfigMaps"]),
        ("Documentation", &["OpenAPI 3.0 spec", "Swagger UI", "Request/Response schemas"]),
    ];
    let items: Vec<GridItem> = outputs
        .into_iter()
        .enumerate()
        .map(|(i, (category, files))| {
            GridItem::new(i, category).field("items", format!("• {}", files.join("  • ")))
        })
        .collect();
    let card = CardTemplate::new()
        .slot(
            Slot::label(0.4)
                .at(0.0, 0.0)
                .width(2.0)
                .style("DeckBody")
                .with(StyleProps::new().size(16.0).bold(true).color_role("primary")),
        )
        .slot(
            Slot::field("items", 0.4)
                .at(2.3, 0.0)
                .width(6.5)
                .style("DeckBody")
                .with(StyleProps::new().size(13.0)),
        );

    Slide::new().text(header("What CloudScript Generates")).grid(GridGroup::new(
        items,
        GridSpec::new(1, 8.8, 0.4).origin(0.7, 1.5).gaps(0.0, 1.1),
        card,
    ))
}

/// The six services of the e-commerce example.
pub fn service_items() -> Vec<GridItem> {
    [
        ("UserService", "8001"),
        ("ProductService", "8002"),
        ("OrderService", "8003"),
        ("PaymentService", "8004"),
        ("InventoryService", "8005"),
        ("NotificationService", "8006"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, port))| GridItem::new(i, name).field("port", port))
    .collect()
}

/// Three columns of 2.4 × 1.0 in boxes, 2.8 in column pitch, 1.6 in row pitch.
pub fn services_grid() -> GridSpec {
    GridSpec::new(3, 2.4, 1.0).origin(1.0, 1.7).gaps(0.4, 0.6)
}

fn services_slide() -> Slide {
    let card = CardTemplate::new()
        .background(ShapeKind::RoundedRectangle, role("secondary"))
        .line(LineSpec::new(role("primary"), 1.0))
        .padding(Insets::new(0.2, 0.0, 0.0, 0.0))
        .slot(Slot::label(0.4).style("CardText").with(StyleProps::new().size(13.0).bold(true)))
        .slot(
            Slot::template("Port: {port}", 0.3)
                .style("CardText")
                .with(StyleProps::new().size(10.0)),
        );

    Slide::new()
        .text(header("Example: E-commerce Platform"))
        .grid(GridGroup::new(service_items(), services_grid(), card))
        .text(
            TextFrame::new(
                Frame::new(0.5, 5.2, 9.0, 0.4),
                "DeckBody",
                "6 Services • 30+ Endpoints • Full Deployment Config",
            )
            .with(
                StyleProps::new()
                    .italic(true)
                    .color_role("primary")
                    .align(Alignment::Center),
            ),
        )
}

fn testing_slide() -> Slide {
    let items: Vec<GridItem> = [
        ("Lexer Tests", "8 tests"),
        ("Parser Tests", "10 tests"),
        ("Generator Tests", "6 tests"),
        ("End-to-End Tests", "4 tests"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, count))| GridItem::new(i, name).field("count", count).field("status", "✓"))
    .collect();
    let card = CardTemplate::new()
        .background(ShapeKind::RoundedRectangle, role("background"))
        .line(LineSpec::new(role("secondary"), 1.0))
        .slot(
            Slot::field("status", 0.5)
                .at(0.2, 0.1)
                .width(0.5)
                .style("DeckBody")
                .with(centered_props(24.0).bold(true).color_role("success"))
                .valign(VerticalAlign::Middle),
        )
        .slot(
            Slot::label(0.4)
                .at(1.0, 0.15)
                .width(3.0)
                .style("DeckBody")
                .with(StyleProps::new().size(15.0).bold(true)),
        )
        .slot(
            Slot::field("count", 0.4)
                .at(4.3, 0.15)
                .width(2.0)
                .style("DeckCaption")
                .with(StyleProps::new().size(13.0).align(Alignment::Right)),
        );

    Slide::new().text(header("Testing & Quality Assurance")).grid(GridGroup::new(
        items,
        GridSpec::new(1, 7.0, 0.7).origin(1.5, 1.8).gaps(0.0, 0.3),
        card,
    ))
}

fn results_slide() -> Slide {
    let items = vec![
        GridItem::new(0, "Lines of Code").field("value", "2000+").field("color", "primary"),
        GridItem::new(1, "Test Cases").field("value", "28").field("color", "secondary"),
        GridItem::new(2, "Code Generators").field("value", "3").field("color", "accent"),
    ];
    let card = CardTemplate {
        shape: Some(ShapeKind::Rectangle),
        padding: Insets::new(0.5, 0.0, 0.0, 0.0),
        ..CardTemplate::new()
    }
    .fill_from("color")
    .slot(
        Slot::field("value", 0.8)
            .style("CardText")
            .with(StyleProps::new().size(48.0).bold(true)),
    )
    .slot(Slot::label(0.4).style("CardText"));

    Slide::new().text(header("Project Results")).grid(GridGroup::new(
        items,
        GridSpec::new(3, 2.4, 2.0).origin(1.0, 2.2).gaps(0.4, 0.0),
        card,
    ))
}

fn conclusion_slide() -> Slide {
    let line = |text: &str| Run::new(text).size(18.0).color_role("white");
    Slide::new()
        .background(role("dark"))
        .text(
            TextFrame::new(Frame::new(0.5, 1.5, 9.0, 0.8), "DeckTitle", "Conclusion")
                .with(StyleProps::new().size(36.0).font_role("body")),
        )
        .text(
            TextFrame::rich(
                Frame::new(0.5, 2.8, 9.0, 1.5),
                vec![
                    line("CloudScript simplifies microservice development\n"),
                    line("by providing a declarative DSL that generates\n"),
                    line("production-ready deployment configurations."),
                ],
            )
            .style("DeckBody")
            .with(StyleProps::new().align(Alignment::Center)),
        )
        .shape(
            ShapeSpec::new(ShapeKind::RoundedRectangle, Frame::new(2.5, 4.5, 5.0, 0.8))
                .fill(role("primary")),
        )
        .text(
            TextFrame::new(Frame::new(2.5, 4.5, 5.0, 0.8), "CardText", "Thank You!")
                .with(StyleProps::new().size(24.0).bold(true))
                .valign(VerticalAlign::Middle),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn stylesheet_freezes_against_preset() {
        let theme = Theme::cloudscript();
        let resolver = stylesheet().unwrap().freeze(&theme).unwrap();
        let h2 = resolver.resolve("Heading2", &StyleProps::default()).unwrap();
        assert_eq!(h2.run.font, "Times New Roman");
        assert_eq!(h2.run.size_pt, 14.0);
        assert_eq!(h2.paragraph.outline_level, Some(1));

        let header = resolver.resolve("DeckHeader", &StyleProps::default()).unwrap();
        assert_eq!(header.run.font, "Arial Black");
        assert_eq!(header.run.color.to_hex(), "#065A82");
    }

    #[test]
    fn report_outline_has_chapters_and_sections() {
        let doc = coursework_report().unwrap();
        let outline = doc.outline();
        assert_eq!(outline.iter().filter(|e| e.level == 0).count(), 7);
        assert!(outline.iter().any(|e| e.text == "4.4. Тестирование компилятора"));
    }

    #[test]
    fn deck_has_ten_slides() {
        let deck = cloudscript_deck();
        assert_eq!(deck.slides.len(), 10);
        assert_eq!(service_items().len(), 6);
    }
}
