//! Transaction records.

use serde::{Deserialize, Serialize};

use crate::models::{query::filter_fields, SourceResource};

filter_fields! {
	/// Fields a transactions query can filter, sort or group on
	pub enum TransactionFilterField for SourceResource::Transactions {
		Hash => "hash",
		Nonce => "nonce",
		BlockHash => "block_hash",
		BlockNumber => "block_number",
		BlockTimestamp => "block_timestamp",
		TransactionIndex => "transaction_index",
		FromAddress => "from_address",
		ToAddress => "to_address",
		Value => "value",
		Gas => "gas",
		GasPrice => "gas_price",
		Data => "data",
		FunctionSelector => "function_selector",
		MaxFeePerGas => "max_fee_per_gas",
		MaxPriorityFeePerGas => "max_priority_fee_per_gas",
		TransactionType => "transaction_type",
		R => "r",
		S => "s",
		V => "v",
		AccessList => "access_list",
		ContractAddress => "contract_address",
		GasUsed => "gas_used",
		CumulativeGasUsed => "cumulative_gas_used",
		EffectiveGasPrice => "effective_gas_price",
		BlobGasUsed => "blob_gas_used",
		BlobGasPrice => "blob_gas_price",
		LogsBloom => "logs_bloom",
		Status => "status",
	}
}

/// An indexed transaction.
///
/// Amounts and fee values are decimal strings since they overflow 64 bits. The
/// receipt fields are `None` while the transaction is pending or not yet indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	pub chain_id: u64,
	pub hash: String,
	pub nonce: u64,
	pub block_hash: String,
	pub block_number: u64,
	pub block_timestamp: u64,
	pub transaction_index: u64,
	pub from_address: String,
	pub to_address: String,
	pub value: String,
	pub gas: u64,
	pub gas_price: String,
	pub data: String,
	pub function_selector: String,
	pub max_fee_per_gas: String,
	pub max_priority_fee_per_gas: String,
	pub transaction_type: u64,
	pub r: String,
	pub s: String,
	pub v: String,
	#[serde(default)]
	pub access_list: Option<String>,
	#[serde(default)]
	pub contract_address: Option<String>,
	#[serde(default)]
	pub gas_used: Option<u64>,
	#[serde(default)]
	pub cumulative_gas_used: Option<u64>,
	#[serde(default)]
	pub effective_gas_price: Option<String>,
	#[serde(default)]
	pub blob_gas_used: Option<u64>,
	#[serde(default)]
	pub blob_gas_price: Option<String>,
	#[serde(default)]
	pub logs_bloom: Option<String>,
	#[serde(default)]
	pub status: Option<u64>,
}

impl Transaction {
	/// Whether the transaction has a receipt
	pub fn is_executed(&self) -> bool {
		self.status.is_some()
	}

	/// Whether the transaction executed successfully
	pub fn is_successful(&self) -> bool {
		self.status == Some(1)
	}
}
