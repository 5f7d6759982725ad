//! Request side: query and body maps, request method, base class.

use crate::generator::{
  ast::{ApiDescription, HttpMethod},
  classifier::{ClassifiedApi, ClassifiedParam},
};

/// Assignments into the `parts` map for every parameter bound to `method`.
///
/// Required and optional parameters form separate blocks, each line
/// indented one level.
fn part_blocks(api: &ClassifiedApi, method: HttpMethod) -> Vec<String> {
  let required = api
    .required
    .iter()
    .filter(|param| param.method == method)
    .map(|param| format!("parts[\"{}\"] = {};", param.param.wire_path, encoded(param, "")))
    .collect::<Vec<_>>();
  let optional = api
    .optional
    .iter()
    .filter(|param| param.method == method)
    .map(|param| {
      format!(
        "if ({}_)\n        parts[\"{}\"] = {};",
        param.param.name,
        param.param.wire_path,
        encoded(param, "*")
      )
    })
    .collect::<Vec<_>>();

  [required, optional]
    .into_iter()
    .filter(|lines| !lines.is_empty())
    .map(|lines| format!("    {}\n", lines.join("\n    ")))
    .collect()
}

/// `std::string` members are assigned directly. Everything else goes
/// through `AsString`, which resolves to the generated encoder for enums.
fn encoded(param: &ClassifiedParam, deref: &str) -> String {
  if param.is_string() {
    format!("{deref}{}_", param.param.name)
  } else {
    format!("AsString({deref}{}_)", param.param.name)
  }
}

pub(crate) fn url_creation(api: &ClassifiedApi) -> String {
  let blocks = part_blocks(api, HttpMethod::Get);
  if blocks.is_empty() {
    return String::new();
  }
  format!(
    "\n    std::map<std::string, std::string> & parts = *query_parts;\n{}",
    blocks.join("\n")
  )
}

/// Argument name of `BuildUrl`; commented out when nothing is added to the
/// query.
pub(crate) fn query_parts_arg(api: &ClassifiedApi) -> &'static str {
  if api.has_params_for(HttpMethod::Get) {
    "query_parts"
  } else {
    "/* query_parts */"
  }
}

pub(crate) fn post_data_impl_decl(api: &ClassifiedApi) -> String {
  let post_data = match api.delivery {
    HttpMethod::Post => "\n    sdk::http::SharedBuffer::Pointer GetPostData();\n",
    HttpMethod::Get => "",
  };
  format!(
    "{post_data}\n    sdk::api::RequestMethod GetRequestMethod() const\n    {{\n        return sdk::api::RequestMethod::{};\n    }}\n",
    request_method_name(api.delivery)
  )
}

fn request_method_name(method: HttpMethod) -> &'static str {
  match method {
    HttpMethod::Get => "Get",
    HttpMethod::Post => "Post",
  }
}

pub(crate) fn post_data_impl_def(api: &ClassifiedApi) -> String {
  if api.delivery == HttpMethod::Get {
    return String::new();
  }

  let mut body = String::from(
    "sdk::http::SharedBuffer::Pointer Impl::GetPostData()\n{\n    std::map<std::string, std::string> parts;\n\n",
  );
  for block in part_blocks(api, HttpMethod::Post) {
    body.push_str(&block);
  }
  body.push_str(concat!(
    "\n",
    "    std::string post_data = MakePost(api_path + \".php\", parts);\n",
    "    AddDebugText(\" POST data: \" + post_data + \"\\\\n\");\n",
    "    return sdk::http::SharedBuffer::Create(post_data);\n",
    "}\n",
    "\n",
  ));
  body
}

pub(crate) fn hpp_post_data_template(api: &ClassifiedApi) -> &'static str {
  match api.delivery {
    HttpMethod::Post => "    /** Requester optional method. */\n    sdk::http::SharedBuffer::Pointer GetPostData();\n\n",
    HttpMethod::Get => "",
  }
}

pub(crate) fn cpp_post_data_template(api: &ClassifiedApi) -> &'static str {
  match api.delivery {
    HttpMethod::Post => {
      "sdk::http::SharedBuffer::Pointer Request::GetPostData()\n{\n    return impl_->GetPostData();\n}\n\n"
    }
    HttpMethod::Get => "",
  }
}

pub(crate) fn request_base(api: &ApiDescription) -> &'static str {
  if api.uses_session_token {
    "SessionTokenApiBase<Response>"
  } else {
    "TokenlessApiBase<Response>"
  }
}

pub(crate) fn request_base_header(api: &ApiDescription) -> &'static str {
  if api.uses_session_token {
    "sdk/api/session_token_api_base.hpp"
  } else {
    "sdk/api/tokenless_api_base.hpp"
  }
}
