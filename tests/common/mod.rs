#![allow(dead_code)]

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a temp file with the given extension. The file is
    /// removed when the handle drops.
    pub fn create_temp_spec(content: &str, ext: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("oarv_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    pub fn create_temp_yaml(content: &str) -> NamedTempFile {
        create_temp_spec(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> NamedTempFile {
        create_temp_spec(content, "json")
    }
}

pub mod fixtures {
    use openapi_request_validator::spec::{parse_spec_str, SpecFormat};
    use openapi_request_validator::SpecDocument;

    /// Users and orders API served under `/api/v1`.
    pub const USERS_SPEC: &str = r##"
swagger: "2.0"
info:
  title: Users
  version: "1.0"
basePath: /api/v1
parameters:
  Limit:
    name: limit
    in: query
    type: integer
paths:
  /users:
    get:
      parameters:
        - $ref: "#/parameters/Limit"
        - name: tags
          in: query
          type: array
    post:
      parameters:
        - name: user
          in: body
          required: true
          schema:
            $ref: "#/definitions/User"
  /users/{id}:
    parameters:
      - name: id
        in: path
        required: true
        type: integer
    get:
      parameters:
        - name: active
          in: query
          required: true
          type: boolean
    delete: {}
  /orders/{orderId}:
    put:
      parameters:
        - name: orderId
          in: path
          type: string
        - name: order
          in: body
          schema:
            $ref: "#/definitions/Order"
definitions:
  User:
    type: object
    properties:
      name:
        type: string
      age:
        type: integer
      address:
        $ref: "#/definitions/Address"
  Address:
    type: object
    properties:
      street:
        type: string
      zip:
        type: string
  Order:
    $ref: "#/definitions/OrderBody"
  OrderBody:
    properties:
      quantity:
        type: number
      gift:
        type: boolean
      lines:
        type: array
"##;

    pub fn users_spec() -> SpecDocument {
        parse_spec_str(USERS_SPEC, SpecFormat::Yaml).unwrap()
    }
}
