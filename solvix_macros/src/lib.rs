use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

/// Rewrites a numeric function into the native-function registry signature.
///
/// ```ignore
/// #[solvix_fn]
/// fn sin(x: f64) -> Result<Value, EvalError> { Ok(Value::Number(x.sin())) }
/// ```
///
/// becomes `pub fn sin(args: &CallArgs) -> Result<Value, EvalError>` with an
/// arity check and per-parameter resolution (positional index first, then
/// keyword name). `CallArgs`, `Value` and `EvalError` must be in scope at
/// the expansion site.
#[proc_macro_attribute]
pub fn solvix_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut arg_extractions = Vec::new();

    for (i, arg) in fn_args.iter().enumerate() {
        if let FnArg::Typed(PatType { pat, ty, .. }) = arg {
            let arg_name = match **pat {
                syn::Pat::Ident(ref ident) => &ident.ident,
                _ => panic!("Unsupported argument pattern"),
            };
            let name_literal = arg_name.to_string();

            let extract_code = match **ty {
                Type::Path(ref type_path) => {
                    let type_ident = &type_path.path.segments.last().unwrap().ident;
                    match type_ident.to_string().as_str() {
                        "f64" => quote! {
                            let #arg_name = args.resolve_number(#i, #name_literal)?;
                        },
                        other => panic!("Unsupported type {}", other),
                    }
                }
                _ => panic!("Unsupported argument type"),
            };

            arg_extractions.push(extract_code);
        }
    }

    let fn_name_literal = fn_name.to_string();
    let args_len = arg_extractions.len();
    let expanded = quote! {
        pub fn #fn_name(args: &CallArgs) #fn_output {
            if args.len() != #args_len {
                return Err(EvalError::Type(format!(
                    "{}() expects {} argument(s), got {}",
                    #fn_name_literal, #args_len, args.len()
                )));
            }

            #(#arg_extractions)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
