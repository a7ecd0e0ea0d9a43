//! Example: Laying out MobileNet V1
//!
//! This example builds the MobileNet V1 preset, prints a short summary of
//! each layer and traces the data flow out of one input node.

use strata::{DiagramBuilder, diagram::NodeId, preset, trace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let builder = DiagramBuilder::default();
    let diagram = builder.build(&preset::mobilenet_v1())?;

    println!(
        "{} layers, {} connectors, {} markers\n",
        diagram.layers().len(),
        diagram.edge_count(),
        diagram.markers().len()
    );

    for (layer, caption) in diagram.layers().iter().zip(diagram.captions()) {
        let markers: Vec<_> = diagram
            .markers_for(layer.index())
            .map(|marker| format!("{:?}", marker.kind()))
            .collect();
        println!(
            "{:>2} {:<6} x={:>6.1} nodes={:>2}  {:<40} {}",
            layer.index(),
            layer.kind().name(),
            layer.center_x(),
            layer.displayed_count(),
            caption.lines().join(" / "),
            markers.join(", ")
        );
    }

    let flow = trace::trace_forward(&diagram, NodeId::new(0, 0));
    println!(
        "\nInput node 0 reaches {} nodes through {} connectors",
        flow.nodes().len(),
        flow.edges().len()
    );

    let bounds = diagram.bounds();
    println!(
        "Diagram spans {:.1} × {:.1}",
        bounds.width(),
        bounds.height()
    );

    Ok(())
}
