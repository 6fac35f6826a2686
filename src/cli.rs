use clap::{Args, Parser, Subcommand};
use interlining_common::schema::{
    CONTENT, CUSTOMER, GSM, INDENT_NUMBER, STRUCTURE, STYLE, TYPE_OF_CONSTRUCTION, WASH,
};
use interlining_common::Criteria;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interlining")]
#[command(about = "Interlining data entry and retrieval", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 台帳Excelファイル（省略時は設定ファイル/環境変数）
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話形式で1件入力して保存
    Entry,

    /// JSONファイルのレコードを保存（オブジェクトまたは配列）
    Add {
        #[arg(long, required = true)]
        json: PathBuf,
    },

    /// 条件で検索
    Retrieve {
        #[command(flatten)]
        filters: FilterArgs,

        /// 条件を対話形式で入力
        #[arg(short, long)]
        interactive: bool,

        /// 結果をファイルに保存（.xlsx / .json）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 結果をJSONで標準出力
        #[arg(long)]
        json: bool,
    },

    /// 台帳全体を表示
    Show,

    /// 設定を表示/編集
    Config {
        /// 台帳ファイルのパスを設定
        #[arg(long)]
        set_data_file: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 検索条件（検索フォームの8項目）
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub indent_number: Option<String>,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub style: Option<String>,
    #[arg(long)]
    pub wash: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub gsm: Option<String>,
    #[arg(long)]
    pub structure: Option<String>,
    #[arg(long)]
    pub construction: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> Criteria {
        [
            (INDENT_NUMBER, &self.indent_number),
            (CUSTOMER, &self.customer),
            (STYLE, &self.style),
            (WASH, &self.wash),
            (CONTENT, &self.content),
            (GSM, &self.gsm),
            (STRUCTURE, &self.structure),
            (TYPE_OF_CONSTRUCTION, &self.construction),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| (field, v.clone())))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_retrieve_args_to_criteria() {
        let cli = Cli::parse_from([
            "interlining",
            "retrieve",
            "--gsm",
            "120",
            "--customer",
            "Acme",
            "--structure",
            "",
        ]);
        let Commands::Retrieve { filters, .. } = cli.command else {
            panic!("expected retrieve");
        };
        let criteria = filters.to_criteria();
        let pairs: Vec<_> = criteria.iter().collect();
        assert_eq!(pairs, vec![(CUSTOMER, "Acme"), (GSM, "120")]);
    }

    #[test]
    fn test_global_data_file() {
        let cli = Cli::parse_from(["interlining", "show", "--data-file", "x.xlsx"]);
        assert_eq!(cli.data_file, Some(PathBuf::from("x.xlsx")));
    }
}
