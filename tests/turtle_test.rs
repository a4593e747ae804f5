//! Tests for Turtle emission

use reacs_onto::application::turtle::{emit_lines, render_turtle, TurtleEmitter, HEADER};
use reacs_onto::domain::{Row, Taxonomy, TreeBuilder};

fn build(rows: &[Row]) -> Taxonomy {
    TreeBuilder::build(rows).expect("valid tree")
}

#[test]
fn given_section_and_linked_class_when_emitting_then_layout_is_exact() {
    // Arrange
    let taxonomy = build(&[
        Row::new("B", "", "Секция"),
        Row::new("B", "06", "Класс")
            .with_stix("Oil and Gas", "Энергетика", "нефть")
            .with_misp("Energy", "Энергия"),
    ]);

    // Act
    let lines = emit_lines(&taxonomy);

    // Assert
    let expected = [
        "reacs:reacs-section--B a reacs:REACSSection ,",
        "\t\towl:NamedIndividual ;",
        "\td3f:name \"Секция\"@ru .",
        "reacs:reacs-class--06 a reacs:REACSClass ,",
        "\t\towl:NamedIndividual ;",
        "\td3f:has-parent reacs:reacs-section--B ;",
        "\treacs:reacs-id \"06\" ;",
        "\td3f:name \"Класс\"@ru .",
        "sec-kg:stix-sector--Oil-and-Gas a stix:IndustrySector ,",
        "\t\towl:NamedIndividual ;",
        "\td3f:name \"Oil and Gas\"@en ,",
        "\t\t\"Энергетика\"@ru ;",
        "\towl:sameAs reacs:reacs-class--06 .",
        "reacs:reacs-class--06 owl:sameAs sec-kg:stix-sector--Oil-and-Gas .",
        "sec-kg:stix-sector--Oil-and-Gas sec-kg:aliases \"нефть\"@ru .",
        "sec-kg:misp-sector--Energy a sec-kg:Industry ,",
        "\t\towl:NamedIndividual ;",
        "\td3f:name \"Energy\"@en ,",
        "\t\t\"Энергия\"@ru ;",
        "\towl:sameAs reacs:reacs-class--06 .",
        "reacs:reacs-class--06 owl:sameAs sec-kg:misp-sector--Energy .",
    ];
    assert_eq!(lines, expected);
}

#[test]
fn given_species_when_emitting_then_parent_is_subgroup_and_slug_is_spice() {
    // Arrange
    let taxonomy = build(&[
        Row::new("A", "01", "Сельское хозяйство"),
        Row::new("A", "01", "Растениеводство"),
        Row::new("A", "01.1", "Однолетние"),
        Row::new("A", "01.11", "Зерновые"),
        Row::new("A", "01.11.1", "Зерновые культуры"),
        Row::new("A", "01.11.11", "Пшеница"),
    ]);

    // Act
    let lines = emit_lines(&taxonomy);

    // Assert
    let start = lines
        .iter()
        .position(|l| l == "reacs:reacs-spice--01.11.11 a reacs:REACSSpecies ,")
        .expect("species block");
    assert_eq!(lines[start + 2], "\td3f:has-parent reacs:reacs-subgroup--01.11.1 ;");
    assert_eq!(lines[start + 3], "\treacs:reacs-id \"01.11.11\" ;");
    assert!(lines.contains(&"\td3f:has-parent reacs:reacs-class--01 ;".to_string()));
    assert!(lines.contains(&"\td3f:has-parent reacs:reacs-group--01.11 ;".to_string()));
}

#[test]
fn given_two_stix_names_when_emitting_then_both_link_to_node() {
    // Arrange
    let taxonomy = build(&[
        Row::new("D", "35", "Энергоснабжение"),
        Row::new("D", "35", "Электроэнергия").with_stix("Oil and Gas,Energy", "Энергетика", ""),
    ]);

    // Act
    let lines = emit_lines(&taxonomy);

    // Assert
    for other in ["sec-kg:stix-sector--Oil-and-Gas", "sec-kg:stix-sector--Energy"] {
        assert!(lines.contains(&format!("reacs:reacs-class--35 owl:sameAs {other} .")));
        assert!(lines.contains(&format!("{other} a stix:IndustrySector ,")));
    }
    assert_eq!(
        lines.iter().filter(|l| l.as_str() == "\t\t\"Энергетика\"@ru ;").count(),
        2
    );
}

#[test]
fn given_same_sector_on_two_nodes_when_emitting_then_block_repeats() {
    // Arrange
    let taxonomy = build(&[
        Row::new("K", "64", "Финансы"),
        Row::new("K", "64", "Банки").with_stix("Financial Services", "Финансы", ""),
        Row::new("K", "65", "Страхование").with_stix("Financial Services", "Финансы", ""),
    ]);

    // Act
    let lines = emit_lines(&taxonomy);

    // Assert
    let declarations = lines
        .iter()
        .filter(|l| l.as_str() == "sec-kg:stix-sector--Financial-Services a stix:IndustrySector ,")
        .count();
    assert_eq!(declarations, 2);
}

#[test]
fn given_tree_when_rendering_then_header_precedes_newline_terminated_lines() {
    // Arrange
    let taxonomy = build(&[Row::new("A", "01", "Сельское хозяйство")]);

    // Act
    let document = render_turtle(&taxonomy);

    // Assert
    let body = document.strip_prefix(HEADER).expect("header first");
    assert_eq!(
        body,
        "reacs:reacs-section--A a reacs:REACSSection ,\n\t\towl:NamedIndividual ;\n\td3f:name \"Сельское хозяйство\"@ru .\n"
    );
}

#[test]
fn given_empty_tree_when_rendering_then_only_header() {
    assert_eq!(render_turtle(&Taxonomy::new()), HEADER);
}

#[test]
fn given_emitter_when_reused_then_lines_accumulate() {
    // Arrange
    let taxonomy = build(&[Row::new("A", "01", "Сельское хозяйство")]);
    let mut emitter = TurtleEmitter::new();

    // Act
    emitter.emit_taxonomy(&taxonomy);
    emitter.emit_taxonomy(&taxonomy);

    // Assert
    assert_eq!(emitter.lines().len(), 6);
}
