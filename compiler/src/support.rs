use crate::{synth::OPTIONS_TYPE, utils::quote};

/// File name of the rendered support block.
pub const SUPPORT_FILE: &str = "options.go";

/// Option plumbing shared by every generated function. `version` is the
/// marker used when no `WithVersion` option is passed.
pub fn render_support(package: &str, version: &str) -> String {
    format!(
        r#"// Code generated by struct-transformer. DO NOT EDIT.

package {package}

// {param} is a function option type.
type {param} func(*TransformOptions)

// TransformOptions holds the settings of one transformation call.
type TransformOptions struct {{
	Version string
}}

// WithVersion sets the version marker passed to oneof write helpers.
func WithVersion(v string) {param} {{
	return func(o *TransformOptions) {{
		o.Version = v
	}}
}}

func applyOptions(opts ...{param}) TransformOptions {{
	o := TransformOptions{{Version: {version}}}
	for _, opt := range opts {{
		opt(&o)
	}}

	return o
}}
"#,
        package = package,
        param = OPTIONS_TYPE,
        version = quote(version),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_support() {
        let out = render_support("transform", "v1");
        assert!(out.contains("package transform\n"));
        assert!(out.contains("type TransformParam func(*TransformOptions)"));
        assert!(out.contains("o := TransformOptions{Version: \"v1\"}"));
        assert!(out.contains("func applyOptions(opts ...TransformParam) TransformOptions {"));
    }
}
