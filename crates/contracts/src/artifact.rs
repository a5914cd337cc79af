use {
    crate::ArtifactError,
    alloy::{
        dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
        json_abi::JsonAbi,
        primitives::Bytes,
    },
    serde::Deserialize,
    std::collections::BTreeMap,
};

/// Compiled contract as written by Hardhat (`hh-sol-artifact-1`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Hex encoded creation code. Unlinked libraries show up as
    /// `__$<hash>$__` placeholders so this can't be decoded eagerly.
    pub bytecode: String,
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, Vec<LinkOffset>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkOffset {
    pub start: usize,
    pub length: usize,
}

impl Artifact {
    /// Name in the `<source>:<contract>` form which is unique within a
    /// project.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Decoded creation code without any constructor arguments.
    pub fn creation_code(&self) -> Result<Vec<u8>, ArtifactError> {
        if !self.link_references.is_empty() {
            let libraries = self
                .link_references
                .iter()
                .flat_map(|(source, libraries)| {
                    libraries.keys().map(move |name| format!("{source}:{name}"))
                })
                .collect();
            return Err(ArtifactError::Unlinked {
                name: self.contract_name.clone(),
                libraries,
            });
        }

        let code = const_hex::decode(self.bytecode.trim()).map_err(|source| {
            ArtifactError::InvalidBytecode {
                name: self.contract_name.clone(),
                source,
            }
        })?;
        if code.is_empty() {
            return Err(ArtifactError::NotDeployable {
                name: self.contract_name.clone(),
            });
        }
        Ok(code)
    }

    /// Creation code followed by the ABI encoded constructor arguments.
    ///
    /// Arguments are given in their human readable form (e.g. `42`,
    /// `0x9559A2F8F32AA39813aefe53f865e37966e81e4A`, `[1,2]`) and coerced to
    /// the types the constructor declares.
    pub fn deployment_code(&self, args: &[String]) -> Result<Bytes, ArtifactError> {
        let mut code = self.creation_code()?;
        let inputs = self
            .abi
            .constructor
            .as_ref()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default();
        if inputs.len() != args.len() {
            return Err(ArtifactError::ConstructorArguments {
                name: self.contract_name.clone(),
                expected: inputs.len(),
                got: args.len(),
            });
        }

        if let Some(constructor) = &self.abi.constructor {
            let values = inputs
                .iter()
                .zip(args)
                .enumerate()
                .map(|(index, (param, arg))| {
                    param
                        .resolve()
                        .and_then(|ty| ty.coerce_str(arg))
                        .map_err(|source| ArtifactError::ConstructorArgument {
                            name: self.contract_name.clone(),
                            index,
                            source,
                        })
                })
                .collect::<Result<Vec<DynSolValue>, _>>()?;
            let encoded = constructor.abi_encode_input(&values).map_err(|source| {
                ArtifactError::ConstructorEncoding {
                    name: self.contract_name.clone(),
                    source,
                }
            })?;
            code.extend(encoded);
        }

        Ok(code.into())
    }
}
