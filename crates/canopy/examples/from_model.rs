//! Example: Laying out a tree built in code
//!
//! This example builds a small tree with `TreeBuilder` instead of parsing a
//! document, walks the view state through a few actions and renders SVG.

use canopy::{
    ViewBuilder,
    state::{ViewAction, ViewState},
    tree::{NodeData, TreeBuilder},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building tree from the model types...\n");

    let mut builder = TreeBuilder::new(NodeData::new());
    let root = builder.root();

    let primates = builder.add_child(root, NodeData::new().with_branch_length(0.3).with_support(98.0));
    builder.add_child(primates, NodeData::new().with_name("Homo sapiens").with_branch_length(0.1));
    builder.add_child(primates, NodeData::new().with_name("Pan troglodytes").with_branch_length(0.12));

    let rodents = builder.add_child(root, NodeData::new().with_branch_length(0.2).with_support(74.0));
    builder.add_child(rodents, NodeData::new().with_name("Mus musculus").with_branch_length(0.4));
    builder.add_child(rodents, NodeData::new().with_name("Rattus norvegicus").with_branch_length(0.38));

    builder.add_child(root, NodeData::new().with_name("Gallus gallus").with_branch_length(1.1));

    let tree = builder.build()?;

    println!("Created tree:");
    println!("  Nodes: {}", tree.len());
    println!("  Leaves: {}", tree.leaf_count());
    println!();

    // Equal branch lengths, no shading
    let state = ViewState::default().apply_all([
        ViewAction::ToggleCladogram,
        ViewAction::ToggleShadeBySupport,
        ViewAction::SetWidth(600.0),
    ]);

    println!("Rendering to SVG...");
    let view = ViewBuilder::default();
    let layout = view.layout_tree(&tree, &state)?;
    let svg = view.render_tree_svg(&layout)?;

    println!("SVG generated successfully!");
    println!("SVG length: {} bytes", svg.len());

    let output_path = "from_model_output.svg";
    std::fs::write(output_path, &svg)?;
    println!("SVG written to: {output_path}");

    Ok(())
}
