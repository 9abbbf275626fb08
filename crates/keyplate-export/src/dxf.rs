use keyplate_geometry::{PlineSource, Sketch};

/// Serialize every finished outline of the sketch as a minimal DXF: header,
/// LTYPE/LAYER tables, then one LWPOLYLINE entity per closed outline.
pub fn dxf_from_sketch(sketch: &Sketch) -> String {
    let mut out = String::new();

    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "HEADER");
    push_pair(&mut out, 9, "$INSUNITS");
    push_pair(&mut out, 70, "4"); // millimeters
    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "TABLES");
    push_pair(&mut out, 0, "TABLE");
    push_pair(&mut out, 2, "LTYPE");
    push_pair(&mut out, 0, "LTYPE");
    push_pair(&mut out, 72, "65");
    push_pair(&mut out, 70, "64");
    push_pair(&mut out, 2, "CONTINUOUS");
    push_pair(&mut out, 3, "______");
    push_pair(&mut out, 73, "0");
    push_pair(&mut out, 40, "0");
    push_pair(&mut out, 0, "ENDTAB");
    push_pair(&mut out, 0, "TABLE");
    push_pair(&mut out, 2, "LAYER");
    push_pair(&mut out, 0, "ENDTAB");
    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "SECTION");
    push_pair(&mut out, 2, "ENTITIES");

    for pl in sketch.outlines() {
        push_pair(&mut out, 0, "LWPOLYLINE");
        push_pair(&mut out, 8, "0");
        push_pair(&mut out, 90, pl.vertex_count().to_string());
        push_pair(&mut out, 70, if pl.is_closed() { "1" } else { "0" });
        for v in &pl.vertex_data {
            push_pair_f64(&mut out, 10, v.x);
            push_pair_f64(&mut out, 20, v.y);
            push_pair_f64(&mut out, 42, v.bulge);
        }
    }

    push_pair(&mut out, 0, "ENDSEC");
    push_pair(&mut out, 0, "EOF");
    out
}

fn push_pair(out: &mut String, code: i32, value: impl AsRef<str>) {
    out.push_str(&code.to_string());
    out.push('\n');
    out.push_str(value.as_ref());
    out.push('\n');
}

fn push_pair_f64(out: &mut String, code: i32, value: f64) {
    let value = if value.abs() < 1e-12 { 0.0 } else { value };
    let mut buf = ryu::Buffer::new();
    push_pair(out, code, buf.format(value));
}
