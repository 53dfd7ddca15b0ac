//! Flat-color line shader. The vertex stage maps the shared unit segment
//! through a per-line model matrix; the fragment stage paints the uniform
//! color.

pub const LINE: &str = r#"
struct LineUniforms {
    model: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: LineUniforms;

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.model * vec4<f32>(position, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.color.rgb, 1.0);
}
"#;
