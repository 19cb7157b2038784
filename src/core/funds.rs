use super::types::Fund;

pub const FUNDS: [Fund; 15] = [
    Fund {
        id: "SPX",
        name: "S&P 500",
        description: "S&P 500 Index",
        yearly_return: 0.11,
        expense_ratio: 0.0003,
    },
    Fund {
        id: "NDX",
        name: "NASDAQ 100",
        description: "NASDAQ 100 Index",
        yearly_return: 0.13,
        expense_ratio: 0.002,
    },
    Fund {
        id: "DJI",
        name: "Dow Jones",
        description: "Dow Jones Industrial Average",
        yearly_return: 0.10,
        expense_ratio: 0.0016,
    },
    Fund {
        id: "MSCI",
        name: "MSCI World",
        description: "MSCI World Index",
        yearly_return: 0.09,
        expense_ratio: 0.002,
    },
    Fund {
        id: "FTSE",
        name: "FTSE 100",
        description: "FTSE 100 Index",
        yearly_return: 0.08,
        expense_ratio: 0.0007,
    },
    Fund {
        id: "N225",
        name: "Nikkei 225",
        description: "Nikkei 225 Index",
        yearly_return: 0.07,
        expense_ratio: 0.0048,
    },
    Fund {
        id: "DAX",
        name: "DAX",
        description: "DAX Index",
        yearly_return: 0.08,
        expense_ratio: 0.0016,
    },
    Fund {
        id: "CAC",
        name: "CAC 40",
        description: "CAC 40 Index",
        yearly_return: 0.07,
        expense_ratio: 0.0025,
    },
    Fund {
        id: "ASX",
        name: "ASX 200",
        description: "ASX 200 Index",
        yearly_return: 0.09,
        expense_ratio: 0.0007,
    },
    Fund {
        id: "TSX",
        name: "TSX Composite",
        description: "S&P/TSX Composite Index",
        yearly_return: 0.08,
        expense_ratio: 0.0006,
    },
    Fund {
        id: "BOND",
        name: "Government Bonds",
        description: "10-Year Government Bonds",
        yearly_return: 0.04,
        expense_ratio: 0.0003,
    },
    Fund {
        id: "GOLD",
        name: "Gold",
        description: "Gold ETF",
        yearly_return: 0.05,
        expense_ratio: 0.004,
    },
    Fund {
        id: "REIT",
        name: "REIT",
        description: "Real Estate Investment Trust",
        yearly_return: 0.10,
        expense_ratio: 0.0012,
    },
    Fund {
        id: "EM",
        name: "Emerging Markets",
        description: "Emerging Markets Index",
        yearly_return: 0.12,
        expense_ratio: 0.0011,
    },
    Fund {
        id: "SMALL",
        name: "Small Cap",
        description: "Small Cap Stocks Index",
        yearly_return: 0.13,
        expense_ratio: 0.0005,
    },
];

pub fn fund_by_id(id: &str) -> Option<&'static Fund> {
    FUNDS.iter().find(|fund| fund.id == id)
}
